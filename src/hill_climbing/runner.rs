//! Steepest-ascent hill climbing with restarts.

use super::config::HillClimbingConfig;
use crate::battle::{CombatRules, DamageFormula, TypeMultiplier};
use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::fitness::FitnessEvaluator;
use crate::search::{
    fresh_team, keep_better, Evaluated, RunContext, SearchOptions, SolveRequest, Solution, Solver,
};
use crate::team::random_replacement;

#[cfg(feature = "serde")]
use serde::Serialize;

/// One step of a hill-climbing run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct HillClimbStep {
    /// Restart index, 0 for the first run.
    pub restart: usize,
    /// Step within the run, from 1.
    pub step: usize,
    /// Fitness of the current team after the step.
    pub current_fitness: f64,
    /// Best fitness over all runs so far.
    pub best_fitness: f64,
    /// Whether the step moved to a better neighbour.
    pub improved: bool,
}

/// Hill climbing over random-replacement neighbourhoods.
///
/// Each step samples `neighbors_per_step` neighbours of the current team and
/// moves to the best of them only if it is strictly fitter. A run ends when
/// the shared evaluation budget is spent or after `patience` steps without
/// a move; `restarts` further runs then begin from fresh random teams.
#[derive(Debug, Clone)]
pub struct HillClimbingSolver {
    config: HillClimbingConfig,
}

impl HillClimbingSolver {
    /// Validates `config` and builds the solver.
    pub fn new(config: HillClimbingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &HillClimbingConfig {
        &self.config
    }
}

impl Solver for HillClimbingSolver {
    type Trace = HillClimbStep;

    fn name(&self) -> &'static str {
        "hill-climbing"
    }

    fn options(&self) -> &SearchOptions {
        &self.config.search
    }

    fn solve<M: TypeMultiplier, D: DamageFormula>(
        &self,
        catalog: &Catalog,
        rules: &CombatRules<M, D>,
        request: SolveRequest<'_>,
    ) -> Result<Solution<HillClimbStep>> {
        let config = &self.config;
        let options = &config.search;
        let RunContext {
            mut rng,
            opponents,
            mut start_team,
            fallback_team,
        } = RunContext::prepare(catalog, rules, options, &request)?;
        let mut evaluator = FitnessEvaluator::new(rules, &opponents).with_parallel(options.parallel);

        let mut history = Vec::new();
        let mut best: Option<Evaluated> = None;

        for restart in 0..=config.restarts {
            if evaluator.stats().requests >= config.max_evaluations {
                break;
            }

            let team = match start_team.take() {
                Some(team) => team,
                None => fresh_team(catalog, options, &fallback_team, &mut rng)?,
            };
            let fitness = evaluator.evaluate(&team);
            let mut current = Evaluated::new(team, fitness);
            keep_better(&mut best, &current);

            let mut stale = 0usize;
            let mut step = 0usize;
            while stale < config.patience && evaluator.stats().requests < config.max_evaluations {
                let mut best_neighbor: Option<Evaluated> = None;
                for _ in 0..config.neighbors_per_step {
                    if evaluator.stats().requests >= config.max_evaluations {
                        break;
                    }
                    let team = random_replacement(
                        &current.team,
                        catalog,
                        config.neighbor_replacements,
                        options.unique_types,
                        &mut rng,
                    )?;
                    let fitness = evaluator.evaluate(&team);
                    keep_better(&mut best_neighbor, &Evaluated::new(team, fitness));
                }

                step += 1;
                let improved = match best_neighbor {
                    Some(neighbor) if neighbor.fitness > current.fitness => {
                        current = neighbor;
                        keep_better(&mut best, &current);
                        stale = 0;
                        true
                    }
                    _ => {
                        stale += 1;
                        false
                    }
                };

                history.push(HillClimbStep {
                    restart,
                    step,
                    current_fitness: current.fitness,
                    best_fitness: best.as_ref().map_or(current.fitness, |b| b.fitness),
                    improved,
                });
            }

            tracing::debug!(
                restart,
                steps = step,
                fitness = current.fitness,
                evaluations = evaluator.stats().requests,
                "hill climbing run finished"
            );
        }

        let stats = evaluator.into_stats();
        let best = best.ok_or_else(|| Error::config("hill climbing evaluated no team"))?;
        tracing::info!(
            solver = self.name(),
            best_fitness = best.fitness,
            evaluations = stats.requests,
            battles = stats.battles,
            "search finished"
        );
        Ok(Solution::new(best, history, opponents, stats))
    }
}
