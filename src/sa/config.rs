//! SA configuration and cooling schedules.

use crate::error::{Error, Result};
use crate::search::SearchOptions;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cooling schedule for temperature reduction.
///
/// # References
///
/// - Geometric: standard textbook approach
/// - Linear: fixed-duration cooling
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CoolingSchedule {
    /// Geometric (exponential) cooling: `T_{k+1} = alpha * T_k`.
    Geometric {
        /// Cooling factor in (0, 1). Higher = slower cooling.
        alpha: f64,
    },

    /// Linear cooling from `T_0` down to `T_min` over
    /// `max_evaluations / iterations_per_temperature` levels.
    Linear,
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Geometric { alpha: 0.995 }
    }
}

/// Configuration for [`SimulatedAnnealingSolver`](super::SimulatedAnnealingSolver).
///
/// # Examples
///
/// ```
/// use team_metaheur::sa::{CoolingSchedule, SaConfig};
///
/// let config = SaConfig::default()
///     .with_initial_temperature(2.0)
///     .with_min_temperature(0.001)
///     .with_cooling(CoolingSchedule::Geometric { alpha: 0.98 })
///     .with_iterations_per_temperature(20)
///     .with_patience(None);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SaConfig {
    /// Initial temperature. Fitness lies in `[0, 1]`, so values around 1
    /// already accept most worsening moves.
    pub initial_temperature: f64,

    /// Minimum temperature. A run stops once T drops to this value.
    pub min_temperature: f64,

    /// Cooling schedule.
    pub cooling: CoolingSchedule,

    /// Proposals at each temperature level.
    pub iterations_per_temperature: usize,

    /// Fitness evaluations allowed across all restarts.
    pub max_evaluations: usize,

    /// Members replaced to produce one neighbour.
    pub neighbor_replacements: usize,

    /// Proposals without a new run best before the run stops.
    /// `None` disables early stopping.
    pub patience: Option<usize>,

    /// Additional independent runs after the first.
    pub restarts: usize,

    /// Options shared with the other solvers.
    pub search: SearchOptions,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1.0,
            min_temperature: 1e-4,
            cooling: CoolingSchedule::default(),
            iterations_per_temperature: 10,
            max_evaluations: 1000,
            neighbor_replacements: 1,
            patience: Some(300),
            restarts: 0,
            search: SearchOptions::default(),
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_max_evaluations(mut self, n: usize) -> Self {
        self.max_evaluations = n;
        self
    }

    pub fn with_neighbor_replacements(mut self, n: usize) -> Self {
        self.neighbor_replacements = n;
        self
    }

    pub fn with_patience(mut self, patience: Option<usize>) -> Self {
        self.patience = patience;
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

    /// Number of temperature levels a linear schedule spreads over.
    pub(crate) fn linear_levels(&self) -> usize {
        (self.max_evaluations / self.iterations_per_temperature).max(1)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_temperature > 0.0) {
            return Err(Error::config("initial_temperature must be positive"));
        }
        if !(self.min_temperature > 0.0) {
            return Err(Error::config("min_temperature must be positive"));
        }
        if self.min_temperature >= self.initial_temperature {
            return Err(Error::config(
                "min_temperature must be less than initial_temperature",
            ));
        }
        if let CoolingSchedule::Geometric { alpha } = self.cooling {
            if !(alpha > 0.0 && alpha < 1.0) {
                return Err(Error::config(format!(
                    "geometric alpha must be in (0, 1), got {alpha}"
                )));
            }
        }
        if self.iterations_per_temperature == 0 {
            return Err(Error::config("iterations_per_temperature must be positive"));
        }
        if self.max_evaluations == 0 {
            return Err(Error::config("max_evaluations must be positive"));
        }
        if self.neighbor_replacements == 0 || self.neighbor_replacements > self.search.team_size {
            return Err(Error::config(format!(
                "neighbor_replacements must be in 1..={}, got {}",
                self.search.team_size, self.neighbor_replacements
            )));
        }
        if self.patience == Some(0) {
            return Err(Error::config("patience must be positive when set"));
        }
        self.search.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SaConfig::default();
        assert!((config.initial_temperature - 1.0).abs() < 1e-12);
        assert!((config.min_temperature - 1e-4).abs() < 1e-15);
        assert_eq!(config.cooling, CoolingSchedule::Geometric { alpha: 0.995 });
        assert_eq!(config.iterations_per_temperature, 10);
        assert_eq!(config.patience, Some(300));
    }

    #[test]
    fn test_validate_ok() {
        assert!(SaConfig::default().validate().is_ok());
        assert!(SaConfig::default()
            .with_cooling(CoolingSchedule::Linear)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_bad_temperature() {
        let config = SaConfig::default().with_initial_temperature(-1.0);
        assert!(config.validate().is_err());
        let config = SaConfig::default().with_initial_temperature(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_min_ge_initial() {
        let config = SaConfig::default()
            .with_initial_temperature(10.0)
            .with_min_temperature(20.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_alpha() {
        let config = SaConfig::default().with_cooling(CoolingSchedule::Geometric { alpha: 1.5 });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_patience_and_replacements() {
        assert!(SaConfig::default().with_patience(Some(0)).validate().is_err());
        assert!(SaConfig::default().with_patience(None).validate().is_ok());
        assert!(SaConfig::default()
            .with_neighbor_replacements(7)
            .validate()
            .is_err());
    }

    #[test]
    fn test_linear_levels() {
        let config = SaConfig::default()
            .with_max_evaluations(1000)
            .with_iterations_per_temperature(10);
        assert_eq!(config.linear_levels(), 100);
        let config = config.with_iterations_per_temperature(5000);
        assert_eq!(config.linear_levels(), 1);
    }
}
