//! Fitness computation and the cached evaluator.

use crate::battle::{CombatRules, DamageFormula, TypeMultiplier};
use crate::team::{Signature, Team};
use std::collections::HashMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Mean remaining-HP fraction of `team` over `opponents`.
///
/// An empty pool, or a team with no starting HP, scores 0.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use team_metaheur::battle::CombatRules;
/// use team_metaheur::fitness::fitness;
/// use team_metaheur::team::{generate_opponent_pool, generate_team, OpponentPoolConfig};
/// # use team_metaheur::catalog::{BaseStats, Catalog, Effectiveness, ElementType, Unit};
/// # let stats = BaseStats { hp: 60, attack: 30, special_attack: 30, defense: 20, special_defense: 20, speed: 40 };
/// # let units = ElementType::ALL
/// #     .iter()
/// #     .zip(1u32..)
/// #     .map(|(&t, id)| Unit::new(id, format!("u{id}"), t, None, stats, Effectiveness::neutral()))
/// #     .collect::<team_metaheur::Result<Vec<_>>>()?;
/// # let catalog = Catalog::new(units)?;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let team = generate_team(&catalog, 6, true, &mut rng)?;
/// let pool = generate_opponent_pool(&catalog, &OpponentPoolConfig::bounded(5, 10, 6, true), &mut rng)?;
/// let rules = CombatRules::default();
///
/// let score = fitness(&team, &pool, &rules);
/// assert!((0.0..=1.0).contains(&score));
/// assert_eq!(fitness(&team, &[], &rules), 0.0);
/// # Ok::<(), team_metaheur::Error>(())
/// ```
pub fn fitness<M: TypeMultiplier, D: DamageFormula>(
    team: &Team,
    opponents: &[Team],
    rules: &CombatRules<M, D>,
) -> f64 {
    let remaining: Vec<u32> = opponents
        .iter()
        .map(|opponent| rules.remaining_hp(team, opponent))
        .collect();
    mean_fraction(team, &remaining)
}

fn mean_fraction(team: &Team, remaining: &[u32]) -> f64 {
    let starting = team.starting_hp();
    if remaining.is_empty() || starting == 0 {
        return 0.0;
    }
    let total: f64 = remaining
        .iter()
        .map(|&hp| hp as f64 / starting as f64)
        .sum();
    total / remaining.len() as f64
}

/// Counters accumulated by a [`FitnessEvaluator`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct EvaluationStats {
    /// Fitness requests, cached or not.
    pub requests: usize,
    /// Requests answered from the cache.
    pub cache_hits: usize,
    /// Battles actually fought.
    pub battles: usize,
}

/// Fitness oracle bound to one opponent pool for the length of a run.
///
/// Scores are cached by team signature. The cache is only valid for the pool
/// the evaluator was built with, so an evaluator is never shared between
/// runs.
pub struct FitnessEvaluator<'a, M, D> {
    rules: &'a CombatRules<M, D>,
    opponents: &'a [Team],
    cache: HashMap<Signature, f64>,
    parallel: bool,
    stats: EvaluationStats,
}

impl<'a, M: TypeMultiplier, D: DamageFormula> FitnessEvaluator<'a, M, D> {
    pub fn new(rules: &'a CombatRules<M, D>, opponents: &'a [Team]) -> Self {
        Self {
            rules,
            opponents,
            cache: HashMap::new(),
            parallel: false,
            stats: EvaluationStats::default(),
        }
    }

    /// Battles opponents on the rayon pool.
    ///
    /// Only takes effect with the `parallel` feature; results are identical
    /// either way.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn opponents(&self) -> &'a [Team] {
        self.opponents
    }

    pub fn stats(&self) -> EvaluationStats {
        self.stats
    }

    /// Consumes the evaluator, returning its counters.
    pub fn into_stats(self) -> EvaluationStats {
        self.stats
    }

    /// Fitness of `team`, from the cache when its signature was seen before.
    pub fn evaluate(&mut self, team: &Team) -> f64 {
        self.stats.requests += 1;
        let signature = team.signature();
        if let Some(&cached) = self.cache.get(&signature) {
            self.stats.cache_hits += 1;
            return cached;
        }

        let remaining = self.battle_all(team);
        self.stats.battles += remaining.len();
        let score = mean_fraction(team, &remaining);
        self.cache.insert(signature, score);
        score
    }

    #[cfg(feature = "parallel")]
    fn battle_all(&self, team: &Team) -> Vec<u32> {
        if self.parallel {
            return self
                .opponents
                .par_iter()
                .map(|opponent| self.rules.remaining_hp(team, opponent))
                .collect();
        }
        self.battle_sequential(team)
    }

    #[cfg(not(feature = "parallel"))]
    fn battle_all(&self, team: &Team) -> Vec<u32> {
        self.battle_sequential(team)
    }

    fn battle_sequential(&self, team: &Team) -> Vec<u32> {
        self.opponents
            .iter()
            .map(|opponent| self.rules.remaining_hp(team, opponent))
            .collect()
    }
}
