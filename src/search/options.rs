//! Options shared by every solver.

use crate::error::{Error, Result};
use crate::team::{OpponentPoolConfig, MAX_TEAM_SIZE, TEAM_SIZE};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default number of opponents generated when no pool is supplied.
pub const DEFAULT_OPPONENTS_LIMIT: usize = 100;

/// Default number of draws per random team before legality is given up.
pub const DEFAULT_TEAM_ATTEMPTS: usize = 20;

/// Run-level options common to all four solvers.
///
/// # Examples
///
/// ```
/// use team_metaheur::search::SearchOptions;
///
/// let options = SearchOptions::default()
///     .with_opponents_limit(Some(50))
///     .with_seed(7);
/// assert!(options.validate().is_ok());
/// assert_eq!(options.opponent_pool().max_attempts, Some(500));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchOptions {
    /// Size of the generated opponent pool. `None` requires the caller to
    /// supply a pool with every solve.
    pub opponents_limit: Option<usize>,

    /// Attempt budget of pool generation, as a multiple of `opponents_limit`.
    pub opponent_attempts_factor: usize,

    /// Draws per random team before generation reports
    /// [`Error::LegalityExhausted`].
    pub team_attempts: usize,

    /// Whether teams must not repeat an elemental type.
    pub unique_types: bool,

    /// Random seed. `None` draws one from the operating system.
    pub seed: Option<u64>,

    /// Members per team.
    pub team_size: usize,

    /// Battle opponents in parallel (requires the `parallel` feature).
    pub parallel: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            opponents_limit: Some(DEFAULT_OPPONENTS_LIMIT),
            opponent_attempts_factor: 10,
            team_attempts: DEFAULT_TEAM_ATTEMPTS,
            unique_types: true,
            seed: None,
            team_size: TEAM_SIZE,
            parallel: false,
        }
    }
}

impl SearchOptions {
    pub fn with_opponents_limit(mut self, limit: Option<usize>) -> Self {
        self.opponents_limit = limit;
        self
    }

    pub fn with_opponent_attempts_factor(mut self, factor: usize) -> Self {
        self.opponent_attempts_factor = factor;
        self
    }

    pub fn with_team_attempts(mut self, attempts: usize) -> Self {
        self.team_attempts = attempts;
        self
    }

    pub fn with_unique_types(mut self, unique: bool) -> Self {
        self.unique_types = unique;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_team_size(mut self, size: usize) -> Self {
        self.team_size = size;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the options.
    pub fn validate(&self) -> Result<()> {
        if self.team_size == 0 {
            return Err(Error::config("team_size must be positive"));
        }
        if self.team_size > MAX_TEAM_SIZE {
            return Err(Error::config(format!(
                "team_size must be at most {MAX_TEAM_SIZE}"
            )));
        }
        if self.opponents_limit == Some(0) {
            return Err(Error::config("opponents_limit must be positive"));
        }
        if self.opponent_attempts_factor == 0 {
            return Err(Error::config("opponent_attempts_factor must be positive"));
        }
        if self.team_attempts == 0 {
            return Err(Error::config("team_attempts must be positive"));
        }
        Ok(())
    }

    /// Pool generation settings derived from these options.
    pub fn opponent_pool(&self) -> OpponentPoolConfig {
        OpponentPoolConfig {
            target: self.opponents_limit,
            max_attempts: self
                .opponents_limit
                .map(|n| n.saturating_mul(self.opponent_attempts_factor)),
            team_size: self.team_size,
            unique_types: self.unique_types,
        }
    }
}
