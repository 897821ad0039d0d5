//! Combat rules: formulas plus the step cap and timeout scoring.

use super::engine::{Battle, BattleOutcome};
use super::formulas::{AttackOverDefense, DamageFormula, ProductMultiplier, TypeMultiplier};
use crate::error::{Error, Result};
use crate::team::Team;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default hard cap on battle steps.
pub const MAX_STEPS_PER_BATTLE: usize = 1000;

/// How a battle stopped by the step cap is scored for the evaluated side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TimeoutPolicy {
    /// A timed-out battle is a loss: remaining HP is reported as 0.
    #[default]
    Loss,
    /// Remaining HP counts only if it strictly exceeds the opponent's.
    HpComparison,
    /// Remaining HP is reported as-is.
    Proportional,
}

/// Everything a battle needs besides the two teams.
///
/// # Examples
///
/// ```
/// use team_metaheur::battle::{AttackMinusDefense, CombatRules, MinMultiplier, TimeoutPolicy};
///
/// let rules = CombatRules::new(MinMultiplier, AttackMinusDefense)
///     .with_max_steps(500)
///     .with_timeout(TimeoutPolicy::HpComparison);
/// assert!(rules.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct CombatRules<M = ProductMultiplier, D = AttackOverDefense> {
    /// Combines the two effectiveness values of a strike.
    pub multiplier: M,
    /// Turns combined stats and the multiplier into damage.
    pub damage: D,
    /// Hard cap on steps per battle.
    pub max_steps: usize,
    /// Scoring of step-capped battles.
    pub timeout: TimeoutPolicy,
}

impl Default for CombatRules {
    fn default() -> Self {
        Self::new(ProductMultiplier, AttackOverDefense)
    }
}

impl<M: TypeMultiplier, D: DamageFormula> CombatRules<M, D> {
    pub fn new(multiplier: M, damage: D) -> Self {
        Self {
            multiplier,
            damage,
            max_steps: MAX_STEPS_PER_BATTLE,
            timeout: TimeoutPolicy::default(),
        }
    }

    pub fn with_max_steps(mut self, n: usize) -> Self {
        self.max_steps = n;
        self
    }

    pub fn with_timeout(mut self, policy: TimeoutPolicy) -> Self {
        self.timeout = policy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_steps == 0 {
            return Err(Error::config("max_steps must be positive"));
        }
        Ok(())
    }

    /// Fights `a` against `b` to a terminal condition.
    pub fn battle(&self, a: &Team, b: &Team) -> BattleOutcome {
        Battle::new(a, b, self).run()
    }

    /// Remaining HP of `a` after fighting `b`, scored under the timeout policy.
    pub fn remaining_hp(&self, a: &Team, b: &Team) -> u32 {
        self.battle(a, b).score(self.timeout)
    }
}
