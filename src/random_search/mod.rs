//! Random search.
//!
//! Draws `trials` independent legal teams and keeps the fittest. No memory
//! is carried between trials, which makes it the baseline the other
//! solvers are measured against.

mod config;
mod runner;

pub use config::RandomSearchConfig;
pub use runner::RandomSearchSolver;
