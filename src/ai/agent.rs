use crate::game::{Board, Piece};

/// Anything that can pick a column for a piece on a board.
pub trait Agent {
    /// Choose a 1-indexed column for `piece`, or `None` when no move is legal.
    fn select_column(&mut self, board: &Board, piece: Piece) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
