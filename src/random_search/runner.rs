//! Random search loop.

use super::config::RandomSearchConfig;
use crate::battle::{CombatRules, DamageFormula, TypeMultiplier};
use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::fitness::FitnessEvaluator;
use crate::search::{
    fresh_team, keep_better, Evaluated, RunContext, SearchOptions, SolveRequest, Solution, Solver,
};

/// Baseline solver: evaluates independent random legal teams and keeps the
/// best one.
///
/// A supplied start team is scored first and competes with the trials.
/// The trace holds every evaluated team in order.
#[derive(Debug, Clone)]
pub struct RandomSearchSolver {
    config: RandomSearchConfig,
}

impl RandomSearchSolver {
    /// Validates `config` and builds the solver.
    pub fn new(config: RandomSearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RandomSearchConfig {
        &self.config
    }
}

impl Solver for RandomSearchSolver {
    type Trace = Evaluated;

    fn name(&self) -> &'static str {
        "random-search"
    }

    fn options(&self) -> &SearchOptions {
        &self.config.search
    }

    fn solve<M: TypeMultiplier, D: DamageFormula>(
        &self,
        catalog: &Catalog,
        rules: &CombatRules<M, D>,
        request: SolveRequest<'_>,
    ) -> Result<Solution<Evaluated>> {
        let options = &self.config.search;
        let RunContext {
            mut rng,
            opponents,
            start_team,
            fallback_team,
        } = RunContext::prepare(catalog, rules, options, &request)?;
        let mut evaluator = FitnessEvaluator::new(rules, &opponents).with_parallel(options.parallel);

        let mut history = Vec::with_capacity(self.config.trials + 1);
        let mut best = None;

        if let Some(team) = start_team {
            let fitness = evaluator.evaluate(&team);
            let start = Evaluated::new(team, fitness);
            keep_better(&mut best, &start);
            history.push(start);
        }

        for trial in 0..self.config.trials {
            let team = fresh_team(catalog, options, &fallback_team, &mut rng)?;
            let fitness = evaluator.evaluate(&team);
            let candidate = Evaluated::new(team, fitness);
            if keep_better(&mut best, &candidate) {
                tracing::debug!(trial, fitness, "random search improved");
            }
            history.push(candidate);
        }

        let stats = evaluator.into_stats();
        let best = best.ok_or_else(|| Error::config("random search evaluated no team"))?;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::Team;
    use crate::testing::{first_team, narrow_catalog, sample_catalog};

    fn solver(trials: usize) -> RandomSearchSolver {
        RandomSearchSolver::new(
            RandomSearchConfig::default()
                .with_trials(trials)
                .with_search(SearchOptions::default().with_opponents_limit(Some(8))),
        )
        .unwrap()
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        assert!(RandomSearchSolver::new(RandomSearchConfig::default().with_trials(0)).is_err());
    }

    #[test]
    fn test_best_is_max_of_history() {
        let catalog = sample_catalog(20);
        let rules = CombatRules::default();
        let solution = solver(30)
            .solve(&catalog, &rules, SolveRequest::new().with_seed(5))
            .unwrap();

        assert_eq!(solution.history.len(), 30);
        let max = solution
            .history
            .iter()
            .map(|e| e.fitness)
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(solution.best_fitness, max);
        assert!((0.0..=1.0).contains(&solution.best_fitness));
        assert_eq!(solution.opponents.len(), 8);
        assert_eq!(solution.evaluations, 30);
        assert!(solution.best.has_unique_types());
    }

    #[test]
    fn test_seed_reproducible() {
        let catalog = sample_catalog(20);
        let rules = CombatRules::default();
        let solver = solver(20);
        let a = solver.solve(&catalog, &rules, SolveRequest::new().with_seed(42)).unwrap();
        let b = solver.solve(&catalog, &rules, SolveRequest::new().with_seed(42)).unwrap();
        assert_eq!(a.best.signature(), b.best.signature());
        assert_eq!(a.best_fitness, b.best_fitness);
        assert_eq!(a.opponents, b.opponents);
    }

    #[test]
    fn test_start_team_is_scored_first() {
        let catalog = sample_catalog(20);
        let rules = CombatRules::default();
        let start = first_team(&catalog, 6);
        let pool = vec![Team::new(catalog.units()[6..12].to_vec()).unwrap()];
        let solution = solver(5)
            .solve(
                &catalog,
                &rules,
                SolveRequest::new()
                    .with_opponents(&pool)
                    .with_start_team(&start)
                    .with_seed(1),
            )
            .unwrap();

        assert_eq!(solution.history.len(), 6);
        assert_eq!(solution.history[0].team, start);
        assert!(solution.best_fitness >= solution.history[0].fitness);
        assert_eq!(solution.opponents, pool);
    }

    #[test]
    fn test_dead_end_draws_do_not_abort_the_run() {
        let catalog = narrow_catalog();
        let rules = CombatRules::default();
        let pool = vec![Team::new(catalog.units()[1..].to_vec()).unwrap()];
        let solver = RandomSearchSolver::new(
            RandomSearchConfig::default()
                .with_trials(50)
                .with_search(SearchOptions::default().with_team_attempts(1)),
        )
        .unwrap();

        for seed in 0..10 {
            let solution = solver
                .solve(&catalog, &rules, SolveRequest::new().with_opponents(&pool).with_seed(seed))
                .unwrap();
            assert_eq!(solution.history.len(), 50);
            assert!(solution.history.iter().all(|e| e.team.has_unique_types()));
        }
    }

    #[test]
    fn test_infeasible_catalog_fails_at_entry() {
        let catalog = narrow_catalog();
        let pool = vec![Team::new(catalog.units()[1..].to_vec()).unwrap()];
        let solver = RandomSearchSolver::new(
            RandomSearchConfig::default()
                .with_search(SearchOptions::default().with_team_size(7)),
        )
        .unwrap();
        let err = solver
            .solve(
                &catalog,
                &CombatRules::default(),
                SolveRequest::new().with_opponents(&pool).with_seed(0),
            )
            .unwrap_err();
        assert!(matches!(err, Error::LegalityExhausted { requested: 7, .. }));
    }
}
