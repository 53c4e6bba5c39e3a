use super::{Board, Piece};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Piece),
    Draw,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("Column is full!")]
    ColumnFull,
    #[error("Invalid column!")]
    InvalidColumn,
    #[error("Game is over!")]
    GameOver,
}

/// A match in progress: the board, whose turn it is, and how it ended.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    current_piece: Piece,
    outcome: Option<GameOutcome>,
}

impl GameState {
    /// Start a match on `board` with `first` to move
    pub fn new(board: Board, first: Piece) -> Self {
        let outcome = Self::outcome_of(&board);
        GameState {
            board,
            current_piece: first,
            outcome,
        }
    }

    /// Standard 6x7 match with X to move
    pub fn initial() -> Self {
        Self::new(Board::standard(), Piece::X)
    }

    /// Piece that moves next
    pub fn current_piece(&self) -> Piece {
        self.current_piece
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Playable 1-indexed columns; empty once the match is over
    pub fn legal_moves(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.valid_moves()
    }

    pub fn move_count(&self) -> usize {
        self.board.move_count()
    }

    /// Drop the current piece into the 1-indexed `col` and pass the turn
    pub fn apply_move(&mut self, col: usize) -> Result<(), MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }
        let stack = self.board.column(col).ok_or(MoveError::InvalidColumn)?;
        if stack.len() >= self.board.rows() {
            return Err(MoveError::ColumnFull);
        }
        if !self.board.play(self.current_piece, col) {
            return Err(MoveError::GameOver);
        }

        tracing::debug!(piece = %self.current_piece, col, "piece dropped");

        self.outcome = Self::outcome_of(&self.board);
        self.current_piece = self.current_piece.opponent();
        Ok(())
    }

    fn outcome_of(board: &Board) -> Option<GameOutcome> {
        if let Some(piece) = board.winner() {
            Some(GameOutcome::Winner(piece))
        } else if board.is_full() {
            Some(GameOutcome::Draw)
        } else {
            None
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = GameState::initial();
        assert_eq!(state.current_piece(), Piece::X);
        assert!(!state.is_terminal());
        assert_eq!(state.legal_moves().len(), 7);
    }

    #[test]
    fn test_apply_move() {
        let mut state = GameState::initial();
        state.apply_move(4).unwrap();

        assert_eq!(state.current_piece(), Piece::O);
        assert_eq!(state.board().get(0, 3), Some(Piece::X));
        assert_eq!(state.move_count(), 1);
    }

    #[test]
    fn test_move_errors() {
        let mut state = GameState::new(Board::new(1, 2).unwrap(), Piece::O);
        assert_eq!(state.apply_move(0), Err(MoveError::InvalidColumn));
        assert_eq!(state.apply_move(3), Err(MoveError::InvalidColumn));
        state.apply_move(1).unwrap();
        assert_eq!(state.apply_move(1), Err(MoveError::ColumnFull));
        assert_eq!(state.current_piece(), Piece::X);
    }

    #[test]
    fn test_win_detection() {
        let mut state = GameState::initial();

        // X builds the bottom row, O stacks on top of it
        for col in 1..=4 {
            state.apply_move(col).unwrap();
            if col < 4 {
                state.apply_move(col).unwrap();
            }
        }

        assert!(state.is_terminal());
        assert_eq!(state.outcome(), Some(GameOutcome::Winner(Piece::X)));
        assert!(state.legal_moves().is_empty());
        assert_eq!(state.apply_move(5), Err(MoveError::GameOver));
    }

    #[test]
    fn test_draw() {
        let mut state = GameState::new(Board::new(2, 2).unwrap(), Piece::X);
        for col in [1, 1, 2, 2] {
            state.apply_move(col).unwrap();
        }
        assert_eq!(state.outcome(), Some(GameOutcome::Draw));
    }
}
