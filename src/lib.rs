//! # Connect Four
//!
//! A Connect Four engine with a recursive, depth-bounded move scorer that
//! drives a computer opponent, plus a terminal UI built with Ratatui.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: column-stack board, pieces, match state
//! - [`ai`]: Averaging move scorer, scoring and random agents
//! - [`ui`]: Terminal UI: difficulty prompt and game view
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod ui;
