//! Experiment execution and summary statistics.

use super::config::ExperimentConfig;
use crate::battle::{CombatRules, DamageFormula, TypeMultiplier};
use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::search::{SolveRequest, Solver};
use crate::team::{generate_opponent_pool, generate_team_retrying, Team};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Best fitness statistics over repeated runs of one solver.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RunSummary {
    /// Solver name.
    pub solver: &'static str,
    /// Best fitness of each run, in run order.
    pub fitnesses: Vec<f64>,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Best team over all runs.
    pub best: Team,
    pub best_fitness: f64,
}

impl RunSummary {
    fn from_runs(solver: &'static str, runs: Vec<(Team, f64)>) -> Result<Self> {
        let fitnesses: Vec<f64> = runs.iter().map(|(_, f)| *f).collect();
        let (best, best_fitness) = runs
            .into_iter()
            .reduce(|a, b| if b.1 > a.1 { b } else { a })
            .ok_or_else(|| Error::config("an experiment needs at least one run"))?;

        let n = fitnesses.len() as f64;
        let mean = fitnesses.iter().sum::<f64>() / n;
        let variance = fitnesses.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / n;

        Ok(Self {
            solver,
            median: median(&fitnesses),
            mean,
            std_dev: variance.sqrt(),
            fitnesses,
            best,
            best_fitness,
        })
    }
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    match n {
        0 => 0.0,
        _ if n % 2 == 1 => sorted[n / 2],
        _ => (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0,
    }
}

/// Two solvers run on the same opponents and seeds.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Comparison {
    pub first: RunSummary,
    pub second: RunSummary,
    /// Runs where `first` found the strictly fitter team.
    pub wins: usize,
    /// Runs where `second` found the strictly fitter team.
    pub losses: usize,
    pub draws: usize,
    /// Opponent pool both solvers were scored against.
    pub opponents: Vec<Team>,
}

/// Runs `solver` `config.runs` times, run `i` seeded with `base_seed + i`.
///
/// Without `opponents`, each run generates its own pool from the solver's
/// options.
pub fn run_repeated<S: Solver, M: TypeMultiplier, D: DamageFormula>(
    solver: &S,
    catalog: &Catalog,
    rules: &CombatRules<M, D>,
    opponents: Option<&[Team]>,
    config: &ExperimentConfig,
) -> Result<RunSummary> {
    config.validate()?;

    let mut runs = Vec::with_capacity(config.runs);
    for i in 0..config.runs {
        let mut request = SolveRequest::new().with_seed(config.seed(i));
        request.opponents = opponents;
        let solution = solver.solve(catalog, rules, request)?;
        tracing::debug!(solver = solver.name(), run = i, fitness = solution.best_fitness, "run finished");
        runs.push((solution.best, solution.best_fitness));
    }

    let summary = RunSummary::from_runs(solver.name(), runs)?;
    tracing::info!(
        solver = summary.solver,
        runs = config.runs,
        mean = summary.mean,
        best = summary.best_fitness,
        "repeated runs finished"
    );
    Ok(summary)
}

/// Runs `first` and `second` on one shared opponent pool and counts which
/// finds the fitter team per run.
///
/// Without `opponents`, the pool is generated once from `first`'s options,
/// seeded with `base_seed`. With `shared_start_team`, both solvers of run
/// `i` start from the same random team.
pub fn compare<A: Solver, B: Solver, M: TypeMultiplier, D: DamageFormula>(
    first: &A,
    second: &B,
    catalog: &Catalog,
    rules: &CombatRules<M, D>,
    opponents: Option<&[Team]>,
    config: &ExperimentConfig,
) -> Result<Comparison> {
    config.validate()?;

    let options = first.options();
    let pool = match opponents {
        Some(pool) => pool.to_vec(),
        None => {
            let mut rng = StdRng::seed_from_u64(config.base_seed);
            generate_opponent_pool(catalog, &options.opponent_pool(), &mut rng)?
        }
    };

    let mut first_runs = Vec::with_capacity(config.runs);
    let mut second_runs = Vec::with_capacity(config.runs);
    let (mut wins, mut losses, mut draws) = (0, 0, 0);

    for i in 0..config.runs {
        let seed = config.seed(i);
        let start = if config.shared_start_team {
            let mut rng = StdRng::seed_from_u64(seed);
            Some(generate_team_retrying(
                catalog,
                options.team_size,
                options.unique_types,
                options.team_attempts,
                &mut rng,
            )?)
        } else {
            None
        };

        let mut request = SolveRequest::new().with_opponents(&pool).with_seed(seed);
        request.start_team = start.as_ref();

        let a = first.solve(catalog, rules, request)?;
        let b = second.solve(catalog, rules, request)?;
        match a.best_fitness.total_cmp(&b.best_fitness) {
            Ordering::Greater => wins += 1,
            Ordering::Less => losses += 1,
            Ordering::Equal => draws += 1,
        }
        first_runs.push((a.best, a.best_fitness));
        second_runs.push((b.best, b.best_fitness));
    }

    let comparison = Comparison {
        first: RunSummary::from_runs(first.name(), first_runs)?,
        second: RunSummary::from_runs(second.name(), second_runs)?,
        wins,
        losses,
        draws,
        opponents: pool,
    };
    tracing::info!(
        first = comparison.first.solver,
        second = comparison.second.solver,
        wins,
        losses,
        draws,
        "comparison finished"
    );
    Ok(comparison)
}
