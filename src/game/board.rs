use std::fmt;

use crate::error::BoardError;

use super::Piece;

pub const DEFAULT_ROWS: usize = 6;
pub const DEFAULT_COLS: usize = 7;

/// Number of equal pieces in a line needed to win.
const LINE: usize = 4;

/// A Connect Four grid stored as one bottom-to-top stack per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<Piece>>,
}

impl Board {
    /// Create a new empty board with the given dimensions
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::InvalidDimensions { rows, cols });
        }
        Ok(Board {
            rows,
            cols,
            cells: (0..cols).map(|_| Vec::with_capacity(rows)).collect(),
        })
    }

    /// Create an empty 6x7 board
    pub fn standard() -> Self {
        Board {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            cells: (0..DEFAULT_COLS)
                .map(|_| Vec::with_capacity(DEFAULT_ROWS))
                .collect(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Column stacks, indexed from 0, each ordered bottom to top
    pub fn cells(&self) -> &[Vec<Piece>] {
        &self.cells
    }

    /// Stack of the given 1-indexed column, or `None` when out of range
    pub fn column(&self, col: usize) -> Option<&[Piece]> {
        col.checked_sub(1)
            .and_then(|c| self.cells.get(c))
            .map(Vec::as_slice)
    }

    /// Get the piece at a 0-indexed position.
    /// Row 0 is the bottom of the board.
    pub fn get(&self, row: usize, col: usize) -> Option<Piece> {
        self.cells.get(col).and_then(|stack| stack.get(row)).copied()
    }

    /// Drop `piece` into the 1-indexed column `col`.
    ///
    /// Returns `false` without touching the board when the column is out of
    /// range, already full, or the game has already been won.
    pub fn play(&mut self, piece: Piece, col: usize) -> bool {
        if col < 1 || col > self.cols {
            return false;
        }
        if self.cells[col - 1].len() >= self.rows {
            return false;
        }
        if self.winner().is_some() {
            return false;
        }
        self.cells[col - 1].push(piece);
        true
    }

    /// Return the piece owning the first four-in-a-row found, if any.
    ///
    /// Cells are scanned column by column from the bottom up; from each
    /// occupied cell the vertical, horizontal, rising and falling diagonal
    /// lines are checked in that order.
    pub fn winner(&self) -> Option<Piece> {
        for c in 0..self.cols {
            for (r, &piece) in self.cells[c].iter().enumerate() {
                let fits_up = r + LINE <= self.rows;
                let fits_right = c + LINE <= self.cols;
                let fits_down = r + 1 >= LINE;

                if fits_up && self.line_matches(piece, c, r, 0, 1) {
                    return Some(piece);
                }
                if fits_right && self.line_matches(piece, c, r, 1, 0) {
                    return Some(piece);
                }
                if fits_up && fits_right && self.line_matches(piece, c, r, 1, 1) {
                    return Some(piece);
                }
                if fits_down && fits_right && self.line_matches(piece, c, r, 1, -1) {
                    return Some(piece);
                }
            }
        }
        None
    }

    /// Check that the `LINE - 1` cells following (c, r) along (dc, dr) hold `piece`
    fn line_matches(&self, piece: Piece, c: usize, r: usize, dc: usize, dr: isize) -> bool {
        (1..LINE).all(|step| {
            let col = c + dc * step;
            let row = r as isize + dr * step as isize;
            row >= 0 && self.get(row as usize, col) == Some(piece)
        })
    }

    /// 1-indexed columns that still have room, in ascending order
    pub fn valid_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, stack)| stack.len() < self.rows)
            .map(|(c, _)| c + 1)
            .collect()
    }

    /// Check if every column is full
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|stack| stack.len() >= self.rows)
    }

    /// A full board with no four-in-a-row
    pub fn is_draw(&self) -> bool {
        self.is_full() && self.winner().is_none()
    }

    /// Total number of pieces on the board
    pub fn move_count(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    /// Text snapshot with 1-indexed column headers and the top row first
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = format!("+{}", "---+".repeat(self.cols));

        writeln!(f, "{border}")?;
        write!(f, "|")?;
        for c in 1..=self.cols {
            write!(f, "{:^3}|", c)?;
        }
        writeln!(f)?;
        writeln!(f, "{border}")?;

        for r in (0..self.rows).rev() {
            write!(f, "|")?;
            for c in 0..self.cols {
                let symbol = self.get(r, c).map_or("", Piece::symbol);
                write!(f, "{:^3}|", symbol)?;
            }
            writeln!(f)?;
            writeln!(f, "{border}")?;
        }
        Ok(())
    }
}
