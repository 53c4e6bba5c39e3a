//! Terminal UI: difficulty prompt and game view for playing against the
//! computer opponent.

mod app;
pub mod board_widget;
mod game_view;

pub use app::{App, Screen};
