//! Solver contract and result types.

use super::options::SearchOptions;
use crate::battle::{CombatRules, DamageFormula, TypeMultiplier};
use crate::catalog::Catalog;
use crate::error::Result;
use crate::fitness::EvaluationStats;
use crate::team::Team;

#[cfg(feature = "serde")]
use serde::Serialize;

/// A team together with its fitness.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Evaluated {
    pub team: Team,
    pub fitness: f64,
}

impl Evaluated {
    pub fn new(team: Team, fitness: f64) -> Self {
        Self { team, fitness }
    }
}

/// Per-call inputs to [`Solver::solve`].
///
/// Everything is optional: without a pool one is generated from the
/// solver's [`SearchOptions`], without a start team the search starts from
/// random teams, and without a seed override the options' seed is used.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolveRequest<'a> {
    /// Opponent pool to evaluate against.
    pub opponents: Option<&'a [Team]>,
    /// Team the search starts from.
    pub start_team: Option<&'a Team>,
    /// Seed taking precedence over [`SearchOptions::seed`].
    pub seed: Option<u64>,
}

impl<'a> SolveRequest<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_opponents(mut self, opponents: &'a [Team]) -> Self {
        self.opponents = Some(opponents);
        self
    }

    pub fn with_start_team(mut self, team: &'a Team) -> Self {
        self.start_team = Some(team);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Outcome of a solver run.
///
/// `opponents` is the pool the run was scored against, whether supplied or
/// generated, so other solvers can be run on identical opponents.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Solution<H> {
    /// Best team found.
    pub best: Team,
    /// Its fitness, in `[0, 1]`.
    pub best_fitness: f64,
    /// Solver-specific trace.
    pub history: Vec<H>,
    /// Opponent pool used.
    pub opponents: Vec<Team>,
    /// Fitness requests made, cached or not.
    pub evaluations: usize,
    /// Requests answered from the fitness cache.
    pub cache_hits: usize,
    /// Battles fought.
    pub battles: usize,
}

impl<H> Solution<H> {
    pub(crate) fn new(
        best: Evaluated,
        history: Vec<H>,
        opponents: Vec<Team>,
        stats: EvaluationStats,
    ) -> Self {
        Self {
            best: best.team,
            best_fitness: best.fitness,
            history,
            opponents,
            evaluations: stats.requests,
            cache_hits: stats.cache_hits,
            battles: stats.battles,
        }
    }
}

/// A team-composition search strategy.
///
/// Implementations own their configuration, validated at construction, and
/// draw all randomness from a generator seeded per call, so two calls with
/// the same seed and inputs return the same [`Solution`].
pub trait Solver {
    /// One entry of [`Solution::history`].
    type Trace: Clone;

    /// Short name used in logs and experiment summaries.
    fn name(&self) -> &'static str;

    /// Options shared with the other solvers.
    fn options(&self) -> &SearchOptions;

    /// Searches `catalog` for the team with the highest fitness.
    fn solve<M: TypeMultiplier, D: DamageFormula>(
        &self,
        catalog: &Catalog,
        rules: &CombatRules<M, D>,
        request: SolveRequest<'_>,
    ) -> Result<Solution<Self::Trace>>;
}
