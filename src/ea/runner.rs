//! EA evolutionary loop execution.
//!
//! [`EvolutionarySolver`] orchestrates the generational process:
//! evaluation → elitism → tournament selection → mutation → repeat.

use super::config::EaConfig;
use super::selection::tournament;
use crate::battle::{CombatRules, DamageFormula, TypeMultiplier};
use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::fitness::FitnessEvaluator;
use crate::search::{
    fresh_team, keep_better, Evaluated, RunContext, SearchOptions, SolveRequest, Solution, Solver,
};
use crate::team::{random_replacement, Team};
use rand::Rng;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Full roster of one generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct GenerationRecord {
    /// Generation index, from 0.
    pub generation: usize,
    /// Every team with its fitness, fittest first.
    pub population: Vec<Evaluated>,
    /// Best fitness in this generation.
    pub best_fitness: f64,
    /// Mean fitness of this generation.
    pub mean_fitness: f64,
}

/// Generational evolutionary algorithm with elitism and tournament
/// selection.
///
/// Runs exactly `generations` rounds. Each round evaluates and records the
/// population; between rounds the `elite_size` fittest teams are carried
/// over unchanged and the rest of the next population is bred by tournament
/// selection followed by random-replacement mutation with probability
/// `mutation_rate`. Parents are copied before mutation, so an elite is never
/// altered by being selected.
#[derive(Debug, Clone)]
pub struct EvolutionarySolver {
    config: EaConfig,
}

impl EvolutionarySolver {
    /// Validates `config` and builds the solver.
    pub fn new(config: EaConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EaConfig {
        &self.config
    }
}

impl Solver for EvolutionarySolver {
    type Trace = GenerationRecord;

    fn name(&self) -> &'static str {
        "evolutionary"
    }

    fn options(&self) -> &SearchOptions {
        &self.config.search
    }

    fn solve<M: TypeMultiplier, D: DamageFormula>(
        &self,
        catalog: &Catalog,
        rules: &CombatRules<M, D>,
        request: SolveRequest<'_>,
    ) -> Result<Solution<GenerationRecord>> {
        let config = &self.config;
        let options = &config.search;
        let RunContext {
            mut rng,
            opponents,
            start_team,
            fallback_team,
        } = RunContext::prepare(catalog, rules, options, &request)?;
        let mut evaluator = FitnessEvaluator::new(rules, &opponents).with_parallel(options.parallel);

        // 1. Initialize population
        let mut population: Vec<Team> = Vec::with_capacity(config.population_size);
        population.extend(start_team);
        while population.len() < config.population_size {
            population.push(fresh_team(catalog, options, &fallback_team, &mut rng)?);
        }

        let mut history = Vec::with_capacity(config.generations);
        let mut best: Option<Evaluated> = None;

        for generation in 0..config.generations {
            // 2. Evaluate, fittest first
            let mut evaluated: Vec<Evaluated> = population
                .into_iter()
                .map(|team| {
                    let fitness = evaluator.evaluate(&team);
                    Evaluated::new(team, fitness)
                })
                .collect();
            evaluated.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));

            let best_fitness = evaluated.first().map_or(0.0, |e| e.fitness);
            let mean_fitness =
                evaluated.iter().map(|e| e.fitness).sum::<f64>() / evaluated.len() as f64;
            if let Some(top) = evaluated.first() {
                keep_better(&mut best, top);
            }
            tracing::debug!(generation, best_fitness, mean_fitness, "generation evaluated");

            // 3. Breed the next generation between rounds only
            population = if generation + 1 < config.generations {
                self.breed(&evaluated, catalog, &mut rng)?
            } else {
                Vec::new()
            };

            history.push(GenerationRecord {
                generation,
                population: evaluated,
                best_fitness,
                mean_fitness,
            });
        }

        let stats = evaluator.into_stats();
        let best = best.ok_or_else(|| Error::config("evolutionary search evaluated no team"))?;
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

impl EvolutionarySolver {
    /// Elites first, then mutated tournament winners.
    fn breed<R: Rng>(
        &self,
        ranked: &[Evaluated],
        catalog: &Catalog,
        rng: &mut R,
    ) -> Result<Vec<Team>> {
        let config = &self.config;
        let mut next: Vec<Team> = ranked
            .iter()
            .take(config.elite_size)
            .map(|e| e.team.clone())
            .collect();

        while next.len() < config.population_size {
            let parent = tournament(ranked, config.tournament_size, rng)
                .ok_or_else(|| Error::config("cannot select from an empty population"))?;
            let parent = &ranked[parent].team;
            let child = if rng.random_bool(config.mutation_rate) {
                random_replacement(
                    parent,
                    catalog,
                    config.mutation_replacements,
                    config.search.unique_types,
                    rng,
                )?
            } else {
                parent.clone()
            };
            next.push(child);
        }
        Ok(next)
    }
}

// ============================================================================
// Tests
// ============================================================================
