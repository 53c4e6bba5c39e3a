use std::sync::atomic::AtomicBool;

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::game::{Board, Piece};

use super::agent::Agent;
use super::scorer::{self, MoveScores};

/// Computer opponent driven by the averaging scorer.
///
/// `depth` is the difficulty: how many plies the scorer looks ahead. Ties
/// between equally scored columns are broken uniformly at random.
pub struct ScoringAgent {
    depth: usize,
    parallel: bool,
    rng: StdRng,
}

impl ScoringAgent {
    pub fn new(depth: usize) -> Self {
        ScoringAgent {
            depth,
            parallel: false,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic tie-breaking for reproducible games
    pub fn with_seed(depth: usize, seed: u64) -> Self {
        ScoringAgent {
            depth,
            parallel: false,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Evaluate top-level candidates on the rayon pool
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Scores for every legal column of `piece`
    pub fn scores(&self, board: &Board, piece: Piece) -> MoveScores {
        if self.parallel {
            scorer::par_score_moves(board, piece, self.depth)
        } else {
            scorer::score_moves(board, piece, self.depth)
        }
    }

    /// Like [`Agent::select_column`], returning `None` if `cancel` is raised
    /// before the search finishes.
    pub fn select_column_cancellable(
        &mut self,
        board: &Board,
        piece: Piece,
        cancel: &AtomicBool,
    ) -> Option<usize> {
        let scores = if self.parallel {
            scorer::par_score_moves_cancellable(board, piece, self.depth, cancel)?
        } else {
            scorer::score_moves_cancellable(board, piece, self.depth, cancel)?
        };
        self.pick(&scores, piece)
    }

    fn pick(&mut self, scores: &MoveScores, piece: Piece) -> Option<usize> {
        let best = scorer::best_moves(scores);
        if best.is_empty() {
            return None;
        }
        let col = best[self.rng.random_range(0..best.len())];
        tracing::debug!(
            %piece,
            depth = self.depth,
            ?scores,
            ties = best.len(),
            col,
            "column selected"
        );
        Some(col)
    }
}

impl Agent for ScoringAgent {
    fn select_column(&mut self, board: &Board, piece: Piece) -> Option<usize> {
        let scores = self.scores(board, piece);
        self.pick(&scores, piece)
    }

    fn name(&self) -> &str {
        "Scorer"
    }
}
