//! Recursive move scoring.
//!
//! Every legal column is tried on a cloned board. An immediate win scores
//! `1` for the mover (and `-1` if the drop somehow completes the other
//! player's line). Otherwise, while search depth remains, the opponent's
//! replies are scored the same way one ply shallower and the move receives
//! the negated mean of those replies. The mean treats the opponent as a
//! random player rather than a minimizing one.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::game::{Board, Piece};

/// Score per legal 1-indexed column, in [-1, 1], from the mover's perspective.
pub type MoveScores = BTreeMap<usize, f64>;

/// Score every legal move of `piece` on `board`, looking `depth` plies ahead.
///
/// Returns an empty map when the board has no legal moves.
pub fn score_moves(board: &Board, piece: Piece, depth: usize) -> MoveScores {
    search(board, piece, depth, None).unwrap_or_default()
}

/// Like [`score_moves`], but gives up and returns `None` as soon as `cancel`
/// is raised.
pub fn score_moves_cancellable(
    board: &Board,
    piece: Piece,
    depth: usize,
    cancel: &AtomicBool,
) -> Option<MoveScores> {
    search(board, piece, depth, Some(cancel))
}

/// Like [`score_moves`], with the top-level candidate columns evaluated in
/// parallel. The result is identical to the sequential scorer.
pub fn par_score_moves(board: &Board, piece: Piece, depth: usize) -> MoveScores {
    par_search(board, piece, depth, None).unwrap_or_default()
}

/// Parallel counterpart of [`score_moves_cancellable`].
pub fn par_score_moves_cancellable(
    board: &Board,
    piece: Piece,
    depth: usize,
    cancel: &AtomicBool,
) -> Option<MoveScores> {
    par_search(board, piece, depth, Some(cancel))
}

/// Columns sharing the highest score, ascending. Empty for an empty map.
pub fn best_moves(scores: &MoveScores) -> Vec<usize> {
    let top = scores.values().copied().fold(f64::NEG_INFINITY, f64::max);
    scores
        .iter()
        .filter(|&(_, &score)| score == top)
        .map(|(&col, _)| col)
        .collect()
}

fn search(
    board: &Board,
    piece: Piece,
    depth: usize,
    cancel: Option<&AtomicBool>,
) -> Option<MoveScores> {
    board
        .valid_moves()
        .into_iter()
        .map(|col| score_candidate(board, piece, col, depth, cancel).map(|s| (col, s)))
        .collect()
}

fn par_search(
    board: &Board,
    piece: Piece,
    depth: usize,
    cancel: Option<&AtomicBool>,
) -> Option<MoveScores> {
    board
        .valid_moves()
        .into_par_iter()
        .map(|col| score_candidate(board, piece, col, depth, cancel).map(|s| (col, s)))
        .collect()
}

fn score_candidate(
    board: &Board,
    piece: Piece,
    col: usize,
    depth: usize,
    cancel: Option<&AtomicBool>,
) -> Option<f64> {
    if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
        return None;
    }

    let mut next = board.clone();
    next.play(piece, col);

    if let Some(winner) = next.winner() {
        return Some(if winner == piece { 1.0 } else { -1.0 });
    }
    if depth <= 1 {
        return Some(0.0);
    }

    let replies = search(&next, piece.opponent(), depth - 1, cancel)?;
    // A drop that fills the board without a line leaves no replies: a draw.
    if replies.is_empty() {
        return Some(0.0);
    }
    let average = replies.values().sum::<f64>() / replies.len() as f64;
    Some(-average)
}
