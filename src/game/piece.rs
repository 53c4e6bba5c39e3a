use std::fmt;

use serde::{Deserialize, Serialize};

/// A marker dropped into the grid by one of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Piece {
    X,
    O,
}

impl Piece {
    /// Get the other player's piece
    pub fn opponent(self) -> Piece {
        match self {
            Piece::X => Piece::O,
            Piece::O => Piece::X,
        }
    }

    /// Single-character marker used in text rendering
    pub fn symbol(self) -> &'static str {
        match self {
            Piece::X => "X",
            Piece::O => "O",
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.symbol())
    }
}
