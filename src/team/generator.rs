//! Legal team generation, mutation and opponent pools.
//!
//! Every function takes the random source explicitly; nothing here touches
//! process-wide random state, so a seeded RNG reproduces the same teams for
//! the same catalog ordering.

use super::types::{types_unique, Team};
use crate::catalog::{Catalog, Unit};
use crate::error::{Error, Result};
use rand::seq::{index, SliceRandom};
use rand::Rng;
use std::collections::HashSet;
use std::sync::Arc;

/// Builds a random legal team of `size` members.
///
/// Catalog entries are drawn uniformly without replacement. A drawn entry
/// that would break the type-uniqueness rule is discarded, not retried, so
/// the loop is bounded by the catalog size.
///
/// # Errors
///
/// [`Error::LegalityExhausted`] when the catalog runs out of candidates
/// before `size` members were accepted.
pub fn generate_team<R: Rng>(
    catalog: &Catalog,
    size: usize,
    unique_types: bool,
    rng: &mut R,
) -> Result<Team> {
    if size == 0 {
        return Err(Error::config("team size must be positive"));
    }

    let mut candidates: Vec<&Arc<Unit>> = catalog.units().iter().collect();
    candidates.shuffle(rng);

    let mut members: Vec<Arc<Unit>> = Vec::with_capacity(size);
    for candidate in candidates {
        if members.len() >= size {
            break;
        }
        members.push(Arc::clone(candidate));
        if unique_types && !types_unique(&members) {
            members.pop();
        }
    }

    if members.len() < size {
        return Err(Error::LegalityExhausted {
            requested: size,
            built: members.len(),
            candidates: catalog.len(),
        });
    }
    Team::with_size(members, size)
}

/// Repeats [`generate_team`] up to `attempts` times.
///
/// A single draw can dead-end on a catalog that does hold a legal team,
/// because discarded candidates are never revisited. Only legality failures
/// are retried; the error of the fullest failed attempt is returned when
/// every attempt fails.
pub fn generate_team_retrying<R: Rng>(
    catalog: &Catalog,
    size: usize,
    unique_types: bool,
    attempts: usize,
    rng: &mut R,
) -> Result<Team> {
    if attempts == 0 {
        return Err(Error::config("team generation attempts must be positive"));
    }

    let mut fullest: Option<Error> = None;
    for _ in 0..attempts {
        match generate_team(catalog, size, unique_types, rng) {
            Ok(team) => return Ok(team),
            Err(err @ Error::LegalityExhausted { built, .. }) => {
                let deeper = match &fullest {
                    Some(Error::LegalityExhausted { built: best, .. }) => built > *best,
                    _ => true,
                };
                if deeper {
                    fullest = Some(err);
                }
            }
            Err(err) => return Err(err),
        }
    }
    Err(fullest.unwrap_or_else(|| Error::config("team generation made no attempt")))
}

/// Mutates `replacements` randomly chosen positions of `team`.
///
/// For each chosen position the not-yet-tried catalog units outside the
/// team are visited in random order and the first one that keeps the whole
/// team legal is taken. Tried candidates are consumed whether accepted or
/// not, so a position stays unchanged when nothing legal remains.
pub fn random_replacement<R: Rng>(
    team: &Team,
    catalog: &Catalog,
    replacements: usize,
    unique_types: bool,
    rng: &mut R,
) -> Result<Team> {
    if replacements > team.len() {
        return Err(Error::config(format!(
            "cannot replace {replacements} members of a team of {}",
            team.len()
        )));
    }
    if replacements == 0 {
        return Ok(team.clone());
    }

    let positions = index::sample(rng, team.len(), replacements);
    let mut pool = catalog.excluding(&team.ids());
    let mut members = team.members().to_vec();

    for position in positions.iter() {
        if pool.is_empty() {
            break;
        }
        pool.shuffle(rng);

        let original = Arc::clone(&members[position]);
        let mut accepted = false;
        while let Some(candidate) = pool.pop() {
            members[position] = candidate;
            if !unique_types || types_unique(&members) {
                accepted = true;
                break;
            }
        }
        if !accepted {
            members[position] = original;
        }
    }

    Team::with_size(members, team.len())
}

/// Parameters for [`generate_opponent_pool`].
///
/// At least one of `target` and `max_attempts` must be set; otherwise the
/// generation loop would have no bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpponentPoolConfig {
    /// Number of distinct teams wanted.
    pub target: Option<usize>,
    /// Maximum number of generation attempts.
    pub max_attempts: Option<usize>,
    /// Size of each opponent team.
    pub team_size: usize,
    /// Whether opponents obey the type-uniqueness rule.
    pub unique_types: bool,
}

impl OpponentPoolConfig {
    /// `target` distinct teams within `target * attempts_factor` attempts.
    pub fn bounded(target: usize, attempts_factor: usize, team_size: usize, unique_types: bool) -> Self {
        Self {
            target: Some(target),
            max_attempts: Some(target.saturating_mul(attempts_factor)),
            team_size,
            unique_types,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.target.is_none() && self.max_attempts.is_none() {
            return Err(Error::config(
                "opponent pool needs a target count or an attempt bound",
            ));
        }
        if self.target == Some(0) {
            return Err(Error::config("opponent pool target must be positive"));
        }
        if self.max_attempts == Some(0) {
            return Err(Error::config("opponent pool max_attempts must be positive"));
        }
        if self.team_size == 0 {
            return Err(Error::config("team size must be positive"));
        }
        Ok(())
    }
}

/// Generates a pool of teams with pairwise distinct signatures.
///
/// Stops after `target` distinct teams or `max_attempts` attempts, whichever
/// comes first, and returns what was collected (possibly fewer than
/// requested). A failed generation counts as an attempt; if every attempt
/// failed, the last legality error is returned.
pub fn generate_opponent_pool<R: Rng>(
    catalog: &Catalog,
    config: &OpponentPoolConfig,
    rng: &mut R,
) -> Result<Vec<Team>> {
    config.validate()?;

    let mut pool = Vec::with_capacity(config.target.unwrap_or(0));
    let mut seen = HashSet::new();
    let mut attempts = 0usize;
    let mut last_error = None;

    loop {
        if config.target.is_some_and(|t| pool.len() >= t) {
            break;
        }
        if config.max_attempts.is_some_and(|m| attempts >= m) {
            break;
        }
        attempts += 1;

        match generate_team(catalog, config.team_size, config.unique_types, rng) {
            Ok(team) => {
                if seen.insert(team.signature()) {
                    pool.push(team);
                }
            }
            Err(err @ Error::LegalityExhausted { .. }) => last_error = Some(err),
            Err(err) => return Err(err),
        }
    }

    if pool.is_empty() {
        if let Some(err) = last_error {
            return Err(err);
        }
    }
    if let Some(target) = config.target {
        if pool.len() < target {
            tracing::warn!(
                collected = pool.len(),
                target,
                attempts,
                "opponent pool is short of its target"
            );
        }
    }
    Ok(pool)
}

/// Every team obtained from `team` by substituting exactly one member with
/// a catalog unit outside the team.
///
/// Enumerated position by position, candidates in catalog order; illegal
/// substitutions are skipped. Stops once `limit` teams were produced.
pub fn neighbor_opponents(
    team: &Team,
    catalog: &Catalog,
    unique_types: bool,
    limit: Option<usize>,
) -> Result<Vec<Team>> {
    if limit == Some(0) {
        return Err(Error::config("neighbour opponent limit must be positive"));
    }

    let candidates = catalog.excluding(&team.ids());
    let mut opponents = Vec::new();

    for position in 0..team.len() {
        for candidate in &candidates {
            let opponent = team.replace(position, Arc::clone(candidate))?;
            if unique_types && !opponent.has_unique_types() {
                continue;
            }
            opponents.push(opponent);
            if limit.is_some_and(|l| opponents.len() >= l) {
                return Ok(opponents);
            }
        }
    }
    Ok(opponents)
}
