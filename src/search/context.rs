//! Per-run setup shared by the solvers.

use super::options::SearchOptions;
use super::types::{Evaluated, SolveRequest};
use crate::battle::{CombatRules, DamageFormula, TypeMultiplier};
use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::team::{generate_opponent_pool, generate_team_retrying, Team};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random source and opponent pool of one solver run.
pub(crate) struct RunContext {
    pub rng: StdRng,
    pub opponents: Vec<Team>,
    pub start_team: Option<Team>,
    /// A legal team known at entry: the start team or a generated one.
    pub fallback_team: Team,
}

impl RunContext {
    /// Validates the inputs, seeds the generator and resolves the pool.
    ///
    /// A supplied pool is used as-is. Otherwise one is generated from the
    /// options, which requires `opponents_limit`. Without a start team one
    /// legal team is generated here, so an infeasible catalog fails before
    /// any battle.
    pub fn prepare<M: TypeMultiplier, D: DamageFormula>(
        catalog: &Catalog,
        rules: &CombatRules<M, D>,
        options: &SearchOptions,
        request: &SolveRequest<'_>,
    ) -> Result<Self> {
        rules.validate()?;
        options.validate()?;
        if let Some(team) = request.start_team {
            check_start_team(team, catalog, options)?;
        }

        let mut rng = match request.seed.or(options.seed) {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let opponents = match request.opponents {
            Some(pool) => pool.to_vec(),
            None if options.opponents_limit.is_some() => {
                generate_opponent_pool(catalog, &options.opponent_pool(), &mut rng)?
            }
            None => {
                return Err(Error::config(
                    "no opponent pool supplied and opponents_limit is not set",
                ))
            }
        };
        if opponents.is_empty() {
            tracing::warn!("opponent pool is empty; every team will score 0");
        }

        let fallback_team = match request.start_team {
            Some(team) => team.clone(),
            None => generate_team_retrying(
                catalog,
                options.team_size,
                options.unique_types,
                options.team_attempts,
                &mut rng,
            )?,
        };

        Ok(Self {
            rng,
            opponents,
            start_team: request.start_team.cloned(),
            fallback_team,
        })
    }
}

/// Generates a random legal team, or hands back `fallback` when every draw
/// dead-ends.
///
/// `fallback` was found legal at entry, so a run never aborts on legality
/// after its first battle.
pub(crate) fn fresh_team<R: Rng>(
    catalog: &Catalog,
    options: &SearchOptions,
    fallback: &Team,
    rng: &mut R,
) -> Result<Team> {
    match generate_team_retrying(
        catalog,
        options.team_size,
        options.unique_types,
        options.team_attempts,
        rng,
    ) {
        Ok(team) => Ok(team),
        Err(err @ Error::LegalityExhausted { .. }) => {
            tracing::warn!(error = %err, "team generation dead-ended; reusing the entry team");
            Ok(fallback.clone())
        }
        Err(err) => Err(err),
    }
}

fn check_start_team(team: &Team, catalog: &Catalog, options: &SearchOptions) -> Result<()> {
    if team.len() != options.team_size {
        return Err(Error::InvalidTeam(format!(
            "start team has {} members, expected {}",
            team.len(),
            options.team_size
        )));
    }
    if let Some(stranger) = team.ids().into_iter().find(|id| catalog.get(*id).is_none()) {
        return Err(Error::InvalidTeam(format!(
            "start team member {stranger} is not in the catalog"
        )));
    }
    if options.unique_types && !team.has_unique_types() {
        return Err(Error::InvalidTeam(
            "start team repeats an elemental type".into(),
        ));
    }
    Ok(())
}

/// Keeps `candidate` if it strictly beats `best`.
pub(crate) fn keep_better(best: &mut Option<Evaluated>, candidate: &Evaluated) -> bool {
    if best
        .as_ref()
        .is_some_and(|b| candidate.fitness <= b.fitness)
    {
        return false;
    }
    *best = Some(candidate.clone());
    true
}
