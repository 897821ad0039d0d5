//! Evolutionary Algorithm (EA).
//!
//! A population of legal teams evolved by elitism, tournament selection and
//! random-replacement mutation. There is no crossover: recombining two
//! line-ups rarely yields a legal team, so variation comes from mutation
//! alone.
//!
//! # Key Types
//!
//! - [`EaConfig`]: population, elite and tournament sizes, mutation settings
//! - [`EvolutionarySolver`]: the [`Solver`](crate::search::Solver) implementation
//! - [`GenerationRecord`]: the full roster of each generation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod config;
mod runner;
mod selection;

pub use config::EaConfig;
pub use runner::{EvolutionarySolver, GenerationRecord};
