//! Hill climbing with random restarts.
//!
//! - [`HillClimbingConfig`]: budget, neighbourhood size, patience, restarts
//! - [`HillClimbingSolver`]: the [`Solver`](crate::search::Solver) implementation
//! - [`HillClimbStep`]: one trace entry per step

mod config;
mod runner;

pub use config::HillClimbingConfig;
pub use runner::{HillClimbStep, HillClimbingSolver};
