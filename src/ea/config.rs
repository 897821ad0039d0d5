//! EA configuration.
//!
//! [`EaConfig`] holds all parameters that control the evolutionary loop.

use crate::error::{Error, Result};
use crate::search::SearchOptions;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the evolutionary algorithm.
///
/// # Defaults
///
/// ```
/// use team_metaheur::ea::EaConfig;
///
/// let config = EaConfig::default();
/// assert_eq!(config.population_size, 5);
/// assert_eq!(config.generations, 20);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use team_metaheur::ea::EaConfig;
///
/// let config = EaConfig::default()
///     .with_population_size(30)
///     .with_elite_size(3)
///     .with_tournament_size(4)
///     .with_mutation_rate(0.3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EaConfig {
    /// Number of teams in the population.
    pub population_size: usize,

    /// Best teams copied unchanged into the next generation.
    pub elite_size: usize,

    /// Number of generations evaluated.
    pub generations: usize,

    /// Distinct individuals sampled per tournament.
    pub tournament_size: usize,

    /// Probability of mutating a selected parent (0.0–1.0).
    pub mutation_rate: f64,

    /// Members replaced by one mutation.
    pub mutation_replacements: usize,

    /// Options shared with the other solvers.
    pub search: SearchOptions,
}

impl Default for EaConfig {
    fn default() -> Self {
        Self {
            population_size: 5,
            elite_size: 1,
            generations: 20,
            tournament_size: 3,
            mutation_rate: 0.6,
            mutation_replacements: 2,
            search: SearchOptions::default(),
        }
    }
}

impl EaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of elites.
    pub fn with_elite_size(mut self, n: usize) -> Self {
        self.elite_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, n: usize) -> Self {
        self.tournament_size = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the members replaced per mutation.
    pub fn with_mutation_replacements(mut self, n: usize) -> Self {
        self.mutation_replacements = n;
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
        if self.population_size == 0 {
            return Err(Error::config("population_size must be positive"));
        }
        if self.elite_size >= self.population_size {
            return Err(Error::config(format!(
                "elite_size ({}) must be less than population_size ({})",
                self.elite_size, self.population_size
            )));
        }
        if self.generations == 0 {
            return Err(Error::config("generations must be positive"));
        }
        if self.tournament_size == 0 || self.tournament_size > self.population_size {
            return Err(Error::config(format!(
                "tournament_size must be in 1..={}, got {}",
                self.population_size, self.tournament_size
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(Error::config(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if self.mutation_replacements == 0 || self.mutation_replacements > self.search.team_size {
            return Err(Error::config(format!(
                "mutation_replacements must be in 1..={}, got {}",
                self.search.team_size, self.mutation_replacements
            )));
        }
        self.search.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EaConfig::default();
        assert_eq!(config.population_size, 5);
        assert_eq!(config.elite_size, 1);
        assert_eq!(config.tournament_size, 3);
        assert!((config.mutation_rate - 0.6).abs() < 1e-12);
        assert_eq!(config.mutation_replacements, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_elite_must_be_below_population() {
        let config = EaConfig::default().with_population_size(4).with_elite_size(4);
        assert!(config.validate().is_err());
        let config = config.with_elite_size(0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tournament_bounded_by_population() {
        let config = EaConfig::default().with_population_size(3).with_tournament_size(4);
        assert!(config.validate().is_err());
        assert!(EaConfig::default().with_tournament_size(0).validate().is_err());
    }

    #[test]
    fn test_mutation_bounds() {
        assert!(EaConfig::default().with_mutation_rate(1.5).validate().is_err());
        assert!(EaConfig::default().with_mutation_rate(f64::NAN).validate().is_err());
        assert!(EaConfig::default()
            .with_mutation_replacements(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_zero_sizes() {
        assert!(EaConfig::default().with_population_size(0).validate().is_err());
        assert!(EaConfig::default().with_generations(0).validate().is_err());
    }
}
