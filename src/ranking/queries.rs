//! Opponent ranking over a team's substitution neighbourhood.

use super::selector::{BestOpponents, RankedOpponent};
use crate::battle::{CombatRules, DamageFormula, TypeMultiplier};
use crate::catalog::Catalog;
use crate::error::Result;
use crate::team::{neighbor_opponents, Team};
use rand::seq::index;
use rand::Rng;

/// Scores `opponent` by the fraction of `team`'s starting HP left after
/// `team` battles it.
fn score<M: TypeMultiplier, D: DamageFormula>(
    team: &Team,
    opponent: Team,
    rules: &CombatRules<M, D>,
) -> RankedOpponent {
    let starting = team.starting_hp();
    let fraction = if starting == 0 {
        0.0
    } else {
        rules.remaining_hp(team, &opponent) as f64 / starting as f64
    };
    RankedOpponent::new(opponent, fraction)
}

/// The `k` one-substitution neighbours of `team` that leave it weakest.
///
/// Neighbours are enumerated as by [`neighbor_opponents`], up to `limit`
/// of them, and each is battled once.
pub fn rank_neighbor_opponents<M: TypeMultiplier, D: DamageFormula>(
    team: &Team,
    catalog: &Catalog,
    rules: &CombatRules<M, D>,
    k: usize,
    unique_types: bool,
    limit: Option<usize>,
) -> Result<Vec<RankedOpponent>> {
    let mut best = BestOpponents::new(k)?;
    for opponent in neighbor_opponents(team, catalog, unique_types, limit)? {
        best.offer(score(team, opponent, rules));
    }
    Ok(best.into_vec())
}

/// Like [`rank_neighbor_opponents`], but battles only `k` neighbours sampled
/// uniformly without replacement.
///
/// Returns every neighbour, ranked, when fewer than `k` exist.
pub fn rank_sampled_opponents<M: TypeMultiplier, D: DamageFormula, R: Rng>(
    team: &Team,
    catalog: &Catalog,
    rules: &CombatRules<M, D>,
    k: usize,
    unique_types: bool,
    rng: &mut R,
) -> Result<Vec<RankedOpponent>> {
    let mut best = BestOpponents::new(k)?;
    let mut neighbors: Vec<Option<Team>> = neighbor_opponents(team, catalog, unique_types, None)?
        .into_iter()
        .map(Some)
        .collect();
    let amount = k.min(neighbors.len());
    for i in index::sample(rng, neighbors.len(), amount) {
        if let Some(opponent) = neighbors[i].take() {
            best.offer(score(team, opponent, rules));
        }
    }
    Ok(best.into_vec())
}

/// 0 if the evaluated team survived the opponent, else the opponent's stats
/// sum.
pub fn opponent_score(ranked: &RankedOpponent) -> u32 {
    if ranked.remaining_fraction > 0.0 {
        0
    } else {
        ranked.stats_sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::rank_order;
    use crate::testing::{first_team, sample_catalog};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_rank_neighbor_opponents_sorted() {
        let catalog = sample_catalog(20);
        let team = first_team(&catalog, 6);
        let rules = CombatRules::default();
        let ranked = rank_neighbor_opponents(&team, &catalog, &rules, 5, true, None).unwrap();

        assert_eq!(ranked.len(), 5);
        for pair in ranked.windows(2) {
            assert_ne!(rank_order(&pair[0], &pair[1]), std::cmp::Ordering::Greater);
        }
        // Nothing left out ranks ahead of the kept worst.
        let all = neighbor_opponents(&team, &catalog, true, None).unwrap();
        let worst = ranked.last().unwrap();
        let ahead = all
            .into_iter()
            .map(|o| score(&team, o, &rules))
            .filter(|r| rank_order(r, worst) == std::cmp::Ordering::Less)
            .count();
        assert!(ahead < 5);
    }

    #[test]
    fn test_limit_caps_candidates() {
        let catalog = sample_catalog(20);
        let team = first_team(&catalog, 6);
        let rules = CombatRules::default();
        let ranked = rank_neighbor_opponents(&team, &catalog, &rules, 10, true, Some(3)).unwrap();
        assert_eq!(ranked.len(), 3);
        assert!(rank_neighbor_opponents(&team, &catalog, &rules, 0, true, None).is_err());
    }

    #[test]
    fn test_rank_sampled_opponents() {
        let catalog = sample_catalog(20);
        let team = first_team(&catalog, 6);
        let rules = CombatRules::default();
        let mut rng = StdRng::seed_from_u64(4);

        let ranked = rank_sampled_opponents(&team, &catalog, &rules, 4, true, &mut rng).unwrap();
        assert_eq!(ranked.len(), 4);
        let signatures: std::collections::HashSet<_> =
            ranked.iter().map(|r| r.opponent.signature()).collect();
        assert_eq!(signatures.len(), 4);

        // More than exist: every neighbour comes back.
        let total = neighbor_opponents(&team, &catalog, true, None).unwrap().len();
        let ranked =
            rank_sampled_opponents(&team, &catalog, &rules, total + 10, true, &mut rng).unwrap();
        assert_eq!(ranked.len(), total);
    }

    #[test]
    fn test_opponent_score() {
        let catalog = sample_catalog(20);
        let team = first_team(&catalog, 6);
        let survived = RankedOpponent::new(team.clone(), 0.25);
        let lost = RankedOpponent::new(team.clone(), 0.0);
        assert_eq!(opponent_score(&survived), 0);
        assert_eq!(opponent_score(&lost), team.stats_sum());
    }
}
