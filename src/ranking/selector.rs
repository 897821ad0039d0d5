//! Bounded best-K collection of opponents.

use crate::error::{Error, Result};
use crate::team::Team;
use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::Serialize;

/// An opponent scored against a fixed team.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RankedOpponent {
    pub opponent: Team,
    /// Fraction of the evaluated team's starting HP left after the battle.
    pub remaining_fraction: f64,
    /// The opponent's battle-stat sum.
    pub stats_sum: u32,
}

impl RankedOpponent {
    pub fn new(opponent: Team, remaining_fraction: f64) -> Self {
        let stats_sum = opponent.stats_sum();
        Self {
            opponent,
            remaining_fraction,
            stats_sum,
        }
    }
}

/// Ranking order: lower remaining fraction first, then higher stats sum.
///
/// `Ordering::Less` means `a` is the better opponent.
pub fn rank_order(a: &RankedOpponent, b: &RankedOpponent) -> Ordering {
    a.remaining_fraction
        .total_cmp(&b.remaining_fraction)
        .then_with(|| b.stats_sum.cmp(&a.stats_sum))
}

/// Keeps the K best opponents seen so far, best first.
///
/// Once full, a candidate only gets in by being strictly better than the
/// current worst, which it then replaces.
///
/// # Examples
///
/// ```
/// use team_metaheur::ranking::{BestOpponents, RankedOpponent};
/// use team_metaheur::team::Team;
/// # use team_metaheur::catalog::{BaseStats, Catalog, Effectiveness, ElementType, Unit};
/// # let stats = BaseStats { hp: 60, attack: 30, special_attack: 30, defense: 20, special_defense: 20, speed: 40 };
/// # let units = ElementType::ALL
/// #     .iter()
/// #     .zip(1u32..)
/// #     .map(|(&t, id)| Unit::new(id, format!("u{id}"), t, None, stats, Effectiveness::neutral()))
/// #     .collect::<team_metaheur::Result<Vec<_>>>()?;
/// # let catalog = Catalog::new(units)?;
///
/// let team = |from: usize| Team::new(catalog.units()[from..from + 6].to_vec());
/// let mut best = BestOpponents::new(2)?;
/// best.offer(RankedOpponent::new(team(0)?, 0.8));
/// best.offer(RankedOpponent::new(team(6)?, 0.1));
/// assert!(best.offer(RankedOpponent::new(team(12)?, 0.5)));
///
/// let ranked = best.into_vec();
/// assert_eq!(ranked.len(), 2);
/// assert_eq!(ranked[0].remaining_fraction, 0.1);
/// assert_eq!(ranked[1].remaining_fraction, 0.5);
/// # Ok::<(), team_metaheur::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct BestOpponents {
    capacity: usize,
    entries: Vec<RankedOpponent>,
}

impl BestOpponents {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::config("best-k capacity must be positive"));
        }
        Ok(Self {
            capacity,
            entries: Vec::with_capacity(capacity),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Kept entries, best first.
    pub fn entries(&self) -> &[RankedOpponent] {
        &self.entries
    }

    /// The entry a new candidate has to beat once the collection is full.
    pub fn worst(&self) -> Option<&RankedOpponent> {
        self.entries.last()
    }

    /// Offers a candidate. Returns whether it was kept.
    pub fn offer(&mut self, candidate: RankedOpponent) -> bool {
        if self.is_full() {
            let beats_worst = self
                .worst()
                .is_some_and(|w| rank_order(&candidate, w) == Ordering::Less);
            if !beats_worst {
                return false;
            }
            self.entries.pop();
        }
        self.entries.push(candidate);
        self.entries.sort_by(rank_order);
        true
    }

    pub fn into_vec(self) -> Vec<RankedOpponent> {
        self.entries
    }
}
