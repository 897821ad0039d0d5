//! Hill climbing configuration.

use crate::error::{Error, Result};
use crate::search::SearchOptions;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for [`HillClimbingSolver`](super::HillClimbingSolver).
///
/// # Examples
///
/// ```
/// use team_metaheur::hill_climbing::HillClimbingConfig;
///
/// let config = HillClimbingConfig::default()
///     .with_max_evaluations(500)
///     .with_neighbors_per_step(10)
///     .with_restarts(2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HillClimbingConfig {
    /// Fitness evaluations allowed across all restarts.
    pub max_evaluations: usize,

    /// Mutated candidates generated per step.
    pub neighbors_per_step: usize,

    /// Members replaced to produce one neighbour.
    pub neighbor_replacements: usize,

    /// Consecutive steps without a move before a run stops.
    pub patience: usize,

    /// Additional independent runs after the first.
    pub restarts: usize,

    /// Options shared with the other solvers.
    pub search: SearchOptions,
}

impl Default for HillClimbingConfig {
    fn default() -> Self {
        Self {
            max_evaluations: 1000,
            neighbors_per_step: 20,
            neighbor_replacements: 1,
            patience: 100,
            restarts: 0,
            search: SearchOptions::default().with_opponent_attempts_factor(20),
        }
    }
}

impl HillClimbingConfig {
    pub fn with_max_evaluations(mut self, n: usize) -> Self {
        self.max_evaluations = n;
        self
    }

    pub fn with_neighbors_per_step(mut self, n: usize) -> Self {
        self.neighbors_per_step = n;
        self
    }

    pub fn with_neighbor_replacements(mut self, n: usize) -> Self {
        self.neighbor_replacements = n;
        self
    }

    pub fn with_patience(mut self, n: usize) -> Self {
        self.patience = n;
        self
    }

    pub fn with_restarts(mut self, n: usize) -> Self {
        self.restarts = n;
        self
    }

    pub fn with_search(mut self, search: SearchOptions) -> Self {
        self.search = search;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.search.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_evaluations == 0 {
            return Err(Error::config("max_evaluations must be positive"));
        }
        if self.neighbors_per_step == 0 {
            return Err(Error::config("neighbors_per_step must be positive"));
        }
        if self.neighbor_replacements == 0 || self.neighbor_replacements > self.search.team_size {
            return Err(Error::config(format!(
                "neighbor_replacements must be in 1..={}, got {}",
                self.search.team_size, self.neighbor_replacements
            )));
        }
        if self.patience == 0 {
            return Err(Error::config("patience must be positive"));
        }
        self.search.validate()
    }
}
