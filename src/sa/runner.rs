//! SA execution loop.

use super::config::{CoolingSchedule, SaConfig};
use crate::battle::{CombatRules, DamageFormula, TypeMultiplier};
use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::fitness::FitnessEvaluator;
use crate::search::{
    fresh_team, keep_better, Evaluated, RunContext, SearchOptions, SolveRequest, Solution, Solver,
};
use crate::team::random_replacement;
use rand::Rng;

#[cfg(feature = "serde")]
use serde::Serialize;

/// One proposal of an annealing run.
///
/// The sequence of steps is enough to redraw the cooling curve together with
/// the current and best fitness.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AnnealingStep {
    /// Proposal index over the whole solve, from 1.
    pub step: usize,
    /// Restart index, 0 for the first run.
    pub restart: usize,
    /// Temperature the proposal was judged at.
    pub temperature: f64,
    /// Fitness of the current team after the proposal.
    pub current_fitness: f64,
    /// Best fitness over all runs so far.
    pub best_fitness: f64,
    /// Whether the proposal was accepted.
    pub accepted: bool,
}

/// Metropolis acceptance probability for a fitness change of `delta`
/// (candidate minus current) at temperature `temperature`.
///
/// Non-negative changes are always accepted. A worsening change is accepted
/// with probability `exp(delta / T)`, which tends to 0 as `T` tends to 0.
///
/// # Examples
///
/// ```
/// use team_metaheur::sa::acceptance_probability;
///
/// assert_eq!(acceptance_probability(0.1, 0.5), 1.0);
/// assert!(acceptance_probability(-0.1, 1e-6) < 1e-12);
/// ```
pub fn acceptance_probability(delta: f64, temperature: f64) -> f64 {
    if delta >= 0.0 {
        1.0
    } else if temperature > 0.0 {
        (delta / temperature).exp()
    } else {
        0.0
    }
}

/// Simulated annealing over random-replacement neighbourhoods.
///
/// The current team may get worse; a run-local best and a global best are
/// tracked separately. A run ends when the temperature reaches its minimum,
/// the shared evaluation budget is spent, or `patience` proposals pass
/// without a new run best.
#[derive(Debug, Clone)]
pub struct SimulatedAnnealingSolver {
    config: SaConfig,
}

impl SimulatedAnnealingSolver {
    /// Validates `config` and builds the solver.
    pub fn new(config: SaConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SaConfig {
        &self.config
    }
}

impl Solver for SimulatedAnnealingSolver {
    type Trace = AnnealingStep;

    fn name(&self) -> &'static str {
        "simulated-annealing"
    }

    fn options(&self) -> &SearchOptions {
        &self.config.search
    }

    fn solve<M: TypeMultiplier, D: DamageFormula>(
        &self,
        catalog: &Catalog,
        rules: &CombatRules<M, D>,
        request: SolveRequest<'_>,
    ) -> Result<Solution<AnnealingStep>> {
        let config = &self.config;
        let options = &config.search;
        let RunContext {
            mut rng,
            opponents,
            mut start_team,
            fallback_team,
        } = RunContext::prepare(catalog, rules, options, &request)?;
        let mut evaluator = FitnessEvaluator::new(rules, &opponents).with_parallel(options.parallel);

        let linear_levels = config.linear_levels();
        let mut history = Vec::new();
        let mut best: Option<Evaluated> = None;
        let mut step = 0usize;

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
            let mut run_best = current.fitness;

            let mut temperature = config.initial_temperature;
            let mut level = 0usize;
            let mut since_improvement = 0usize;

            'cooling: while temperature > config.min_temperature {
                for _ in 0..config.iterations_per_temperature {
                    if evaluator.stats().requests >= config.max_evaluations {
                        break 'cooling;
                    }
                    if config.patience.is_some_and(|p| since_improvement >= p) {
                        break 'cooling;
                    }

                    let team = random_replacement(
                        &current.team,
                        catalog,
                        config.neighbor_replacements,
                        options.unique_types,
                        &mut rng,
                    )?;
                    let fitness = evaluator.evaluate(&team);
                    let delta = fitness - current.fitness;

                    // Metropolis acceptance criterion
                    let accepted = delta >= 0.0
                        || rng.random::<f64>() < acceptance_probability(delta, temperature);
                    if accepted {
                        current = Evaluated::new(team, fitness);
                        keep_better(&mut best, &current);
                    }

                    if current.fitness > run_best {
                        run_best = current.fitness;
                        since_improvement = 0;
                    } else {
                        since_improvement += 1;
                    }

                    step += 1;
                    history.push(AnnealingStep {
                        step,
                        restart,
                        temperature,
                        current_fitness: current.fitness,
                        best_fitness: best.as_ref().map_or(current.fitness, |b| b.fitness),
                        accepted,
                    });
                }

                temperature = cool(temperature, config, level, linear_levels);
                level += 1;
                tracing::debug!(restart, level, temperature, run_best, "temperature lowered");
            }

            tracing::debug!(
                restart,
                run_best,
                evaluations = evaluator.stats().requests,
                "annealing run finished"
            );
        }

        let stats = evaluator.into_stats();
        let best = best.ok_or_else(|| Error::config("simulated annealing evaluated no team"))?;
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

/// Apply the cooling schedule to compute the next temperature.
fn cool(temperature: f64, config: &SaConfig, level: usize, linear_levels: usize) -> f64 {
    match config.cooling {
        CoolingSchedule::Geometric { alpha } => temperature * alpha,
        CoolingSchedule::Linear => {
            let t = config.initial_temperature
                - (level + 1) as f64 * (config.initial_temperature - config.min_temperature)
                    / linear_levels as f64;
            t.max(config.min_temperature)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::Team;
    use crate::testing::{first_team, sample_catalog};

    fn config() -> SaConfig {
        SaConfig::default()
            .with_max_evaluations(200)
            .with_search(SearchOptions::default().with_opponents_limit(Some(6)))
    }

    #[test]
    fn test_acceptance_probability() {
        assert_eq!(acceptance_probability(0.0, 1.0), 1.0);
        assert_eq!(acceptance_probability(0.3, 1e-9), 1.0);
        assert!((acceptance_probability(-0.5, 1.0) - (-0.5f64).exp()).abs() < 1e-12);
        assert_eq!(acceptance_probability(-0.5, 0.0), 0.0);
    }

    #[test]
    fn test_acceptance_vanishes_as_temperature_drops() {
        let mut previous = 1.0;
        for t in [1.0, 0.1, 0.01, 1e-3, 1e-5] {
            let p = acceptance_probability(-0.05, t);
            assert!(p < previous);
            previous = p;
        }
        assert!(previous < 1e-100);
    }

    #[test]
    fn test_geometric_cooling() {
        let config = SaConfig::default().with_cooling(CoolingSchedule::Geometric { alpha: 0.5 });
        assert_eq!(cool(1.0, &config, 0, 1), 0.5);
    }

    #[test]
    fn test_linear_cooling_reaches_min() {
        let config = SaConfig::default()
            .with_cooling(CoolingSchedule::Linear)
            .with_initial_temperature(1.0)
            .with_min_temperature(0.1)
            .with_max_evaluations(30)
            .with_iterations_per_temperature(10);
        let levels = config.linear_levels();
        assert_eq!(levels, 3);
        assert!((cool(1.0, &config, 0, levels) - 0.7).abs() < 1e-12);
        assert!((cool(0.7, &config, 1, levels) - 0.4).abs() < 1e-12);
        assert!((cool(0.4, &config, 2, levels) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_respects_budget_and_traces_every_proposal() {
        let catalog = sample_catalog(20);
        let rules = CombatRules::default();
        let solver = SimulatedAnnealingSolver::new(config().with_patience(None)).unwrap();
        let solution = solver
            .solve(&catalog, &rules, SolveRequest::new().with_seed(17))
            .unwrap();

        assert_eq!(solution.evaluations, 200);
        // One initial evaluation, every other one is a traced proposal.
        assert_eq!(solution.history.len(), 199);
        for pair in solution.history.windows(2) {
            assert!(pair[1].best_fitness >= pair[0].best_fitness);
            assert!(pair[1].temperature <= pair[0].temperature);
        }
        assert!(solution
            .history
            .iter()
            .all(|s| s.best_fitness <= solution.best_fitness));
    }

    #[test]
    fn test_rejected_proposal_keeps_current() {
        let catalog = sample_catalog(20);
        let rules = CombatRules::default();
        let solver = SimulatedAnnealingSolver::new(config()).unwrap();
        let solution = solver
            .solve(&catalog, &rules, SolveRequest::new().with_seed(2))
            .unwrap();

        for pair in solution.history.windows(2) {
            if !pair[1].accepted {
                assert_eq!(pair[1].current_fitness, pair[0].current_fitness);
            }
        }
    }

    #[test]
    fn test_patience_ends_run_early() {
        let catalog = sample_catalog(20);
        let rules = CombatRules::default();
        let solver = SimulatedAnnealingSolver::new(
            config()
                .with_max_evaluations(5000)
                .with_initial_temperature(1e-3)
                .with_min_temperature(1e-9)
                .with_cooling(CoolingSchedule::Geometric { alpha: 0.999 })
                .with_patience(Some(20)),
        )
        .unwrap();
        let solution = solver
            .solve(&catalog, &rules, SolveRequest::new().with_seed(5))
            .unwrap();
        assert!(solution.evaluations < 5000);
    }

    #[test]
    fn test_seed_reproducible_with_start_team() {
        let catalog = sample_catalog(20);
        let rules = CombatRules::default();
        let start = first_team(&catalog, 6);
        let pool = vec![Team::new(catalog.units()[10..16].to_vec()).unwrap()];
        let solver = SimulatedAnnealingSolver::new(config().with_restarts(1)).unwrap();
        let request = SolveRequest::new()
            .with_opponents(&pool)
            .with_start_team(&start)
            .with_seed(99);

        let a = solver.solve(&catalog, &rules, request).unwrap();
        let b = solver.solve(&catalog, &rules, request).unwrap();
        assert_eq!(a.best.signature(), b.best.signature());
        assert_eq!(a.history, b.history);
        assert!(a.best_fitness >= crate::fitness::fitness(&start, &pool, &rules));
    }
}
