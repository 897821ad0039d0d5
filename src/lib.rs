//! Team composition search driven by deterministic combat.
//!
//! Given a catalog of units, find the fixed-size team that keeps the most of
//! its HP on average when battling a pool of opponent teams. The crate
//! provides:
//!
//! - **Catalog**: validated, read-only units with stats, one or two
//!   elemental types and a per-type effectiveness table.
//! - **Teams**: immutable line-ups with order-independent signatures, legal
//!   random generation, random-replacement mutation and opponent pools.
//! - **Combat**: a deterministic turn-based battle with pluggable type
//!   multiplier and damage formulas, used as the fitness oracle.
//! - **Solvers**: Random Search, Hill Climbing, Simulated Annealing and an
//!   Evolutionary Algorithm behind one [`Solver`](search::Solver) contract.
//! - **Ranking**: a best-K selector of the opponents that hurt a team most.
//! - **Experiments**: repeated runs and head-to-head solver comparison.
//!
//! # Example
//!
//! ```
//! use team_metaheur::battle::CombatRules;
//! use team_metaheur::ea::{EaConfig, EvolutionarySolver};
//! use team_metaheur::search::{SearchOptions, SolveRequest, Solver};
//! # use team_metaheur::catalog::{BaseStats, Catalog, Effectiveness, ElementType, Unit};
//! # let stats = BaseStats { hp: 60, attack: 30, special_attack: 30, defense: 20, special_defense: 20, speed: 40 };
//! # let units = ElementType::ALL
//! #     .iter()
//! #     .zip(1u32..)
//! #     .map(|(&t, id)| Unit::new(id, format!("u{id}"), t, None, stats, Effectiveness::neutral()))
//! #     .collect::<team_metaheur::Result<Vec<_>>>()?;
//! # let catalog = Catalog::new(units)?;
//!
//! let options = SearchOptions::default().with_opponents_limit(Some(10));
//! let solver = EvolutionarySolver::new(
//!     EaConfig::default()
//!         .with_generations(3)
//!         .with_search(options)
//!         .with_seed(42),
//! )?;
//! let solution = solver.solve(&catalog, &CombatRules::default(), SolveRequest::new())?;
//! assert!((0.0..=1.0).contains(&solution.best_fitness));
//! println!("{} scores {:.3}", solution.best, solution.best_fitness);
//! # Ok::<(), team_metaheur::Error>(())
//! ```
//!
//! # Features
//!
//! - `parallel`: battle a team against its opponents on the rayon pool.
//! - `serde`: serialization of catalog types, configs, traces and solutions.
//!
//! Randomness is always drawn from a generator seeded per solve; the combat
//! engine uses none. Logging goes through `tracing`; no subscriber is
//! installed by the library.

pub mod battle;
pub mod catalog;
pub mod ea;
pub mod error;
pub mod experiment;
pub mod fitness;
pub mod hill_climbing;
pub mod random_search;
pub mod ranking;
pub mod sa;
pub mod search;
pub mod team;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
