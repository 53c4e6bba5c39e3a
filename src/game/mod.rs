//! Core Connect Four game logic: the column-stack board, the two pieces, and
//! the turn-tracking match state driven by the terminal UI.

mod board;
mod piece;
mod state;

pub use board::{Board, DEFAULT_COLS, DEFAULT_ROWS};
pub use piece::Piece;
pub use state::{GameOutcome, GameState, MoveError};
