//! Experiment configuration.

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings for [`run_repeated`](super::run_repeated) and
/// [`compare`](super::compare).
///
/// Run `i` is seeded with `base_seed + i`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExperimentConfig {
    /// Number of runs per solver.
    pub runs: usize,

    /// Seed of the first run.
    pub base_seed: u64,

    /// In a comparison, start both solvers of run `i` from the same random team.
    pub shared_start_team: bool,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            runs: 10,
            base_seed: 0,
            shared_start_team: false,
        }
    }
}

impl ExperimentConfig {
    pub fn with_runs(mut self, n: usize) -> Self {
        self.runs = n;
        self
    }

    pub fn with_base_seed(mut self, seed: u64) -> Self {
        self.base_seed = seed;
        self
    }

    pub fn with_shared_start_team(mut self, shared: bool) -> Self {
        self.shared_start_team = shared;
        self
    }

    /// Seed of run `index`.
    pub fn seed(&self, index: usize) -> u64 {
        self.base_seed.wrapping_add(index as u64)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.runs == 0 {
            return Err(Error::config("runs must be positive"));
        }
        Ok(())
    }
}
