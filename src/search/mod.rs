//! Common contract of the team-composition solvers.
//!
//! Every solver implements [`Solver`]: given a catalog, combat rules and a
//! [`SolveRequest`], it returns a [`Solution`] holding the best team, its
//! fitness, a solver-specific trace and the opponent pool it was scored
//! against. Run-level knobs shared by all solvers live in [`SearchOptions`].

mod context;
mod options;
mod types;

pub(crate) use context::{fresh_team, keep_better, RunContext};
pub use options::{SearchOptions, DEFAULT_OPPONENTS_LIMIT, DEFAULT_TEAM_ATTEMPTS};
pub use types::{Evaluated, SolveRequest, Solution, Solver};
