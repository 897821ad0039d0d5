//! Repeated runs and head-to-head solver comparison.
//!
//! Metaheuristics are stochastic, so one run says little. [`run_repeated`]
//! runs a solver under consecutive seeds and summarises the best fitness of
//! each run; [`compare`] does the same for two solvers on a shared opponent
//! pool and counts per-run wins.

mod config;
mod runner;

pub use config::ExperimentConfig;
pub use runner::{compare, run_repeated, Comparison, RunSummary};
