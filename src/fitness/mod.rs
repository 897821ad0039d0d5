//! Team fitness against an opponent pool.
//!
//! Fitness is the mean fraction of a team's starting HP left after battling
//! every opponent in the pool, so it always lies in `[0, 1]`.
//!
//! - [`fitness`]: the pure definition.
//! - [`FitnessEvaluator`]: the per-run oracle solvers use, with a cache keyed
//!   by team [`Signature`](crate::team::Signature) and evaluation counters.

mod evaluator;

pub use evaluator::{fitness, EvaluationStats, FitnessEvaluator};
