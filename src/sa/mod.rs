//! Simulated Annealing (SA).
//!
//! A single-solution trajectory search over team compositions. Worsening
//! neighbours are accepted with a probability that falls with temperature,
//! letting a run escape local optima early and settle late.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod config;
mod runner;

pub use config::{CoolingSchedule, SaConfig};
pub use runner::{acceptance_probability, AnnealingStep, SimulatedAnnealingSolver};
