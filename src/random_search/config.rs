//! Random search configuration.

use crate::error::{Error, Result};
use crate::search::SearchOptions;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for [`RandomSearchSolver`](super::RandomSearchSolver).
///
/// # Examples
///
/// ```
/// use team_metaheur::random_search::RandomSearchConfig;
///
/// let config = RandomSearchConfig::default().with_trials(50).with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RandomSearchConfig {
    /// Number of independent random teams evaluated.
    pub trials: usize,

    /// Options shared with the other solvers.
    pub search: SearchOptions,
}

impl Default for RandomSearchConfig {
    fn default() -> Self {
        Self {
            trials: 200,
            search: SearchOptions::default().with_opponent_attempts_factor(20),
        }
    }
}

impl RandomSearchConfig {
    pub fn with_trials(mut self, n: usize) -> Self {
        self.trials = n;
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
        if self.trials == 0 {
            return Err(Error::config("trials must be positive"));
        }
        self.search.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RandomSearchConfig::default();
        assert_eq!(config.trials, 200);
        assert_eq!(config.search.opponent_attempts_factor, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_trials() {
        assert!(RandomSearchConfig::default().with_trials(0).validate().is_err());
    }
}
