//! Computer opponents: the recursive averaging scorer and the agents that
//! turn its scores into a column choice.

mod agent;
mod random;
pub mod scorer;
mod scoring;

pub use agent::Agent;
pub use random::RandomAgent;
pub use scorer::{
    best_moves, par_score_moves, par_score_moves_cancellable, score_moves, score_moves_cancellable,
    MoveScores,
};
pub use scoring::ScoringAgent;
