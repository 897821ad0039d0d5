//! Team value type and its derived views.

use crate::catalog::{Unit, UnitId};
use crate::error::{Error, Result};
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Number of members in a team.
pub const TEAM_SIZE: usize = 6;

/// Largest accepted team.
pub const MAX_TEAM_SIZE: usize = 256;

/// Order-independent identity of a team: its member ids, sorted.
///
/// Used as the key for pool deduplication and fitness caching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Signature(Vec<UnitId>);

impl Signature {
    pub fn ids(&self) -> &[UnitId] {
        &self.0
    }
}

/// An ordered line-up of distinct catalog units.
///
/// Teams are values: [`replace`](Team::replace) and [`swap`](Team::swap)
/// return new teams and leave `self` untouched.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Team {
    members: Vec<Arc<Unit>>,
}

impl Team {
    /// Builds a team of exactly [`TEAM_SIZE`] members.
    pub fn new(members: Vec<Arc<Unit>>) -> Result<Self> {
        Self::with_size(members, TEAM_SIZE)
    }

    /// Builds a team of exactly `size` distinct, valid members.
    ///
    /// Members are re-checked with [`Unit::validate`], so a unit assembled
    /// from a struct literal cannot bypass the catalog invariants.
    pub fn with_size(members: Vec<Arc<Unit>>, size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidTeam("team size must be positive".into()));
        }
        if size > MAX_TEAM_SIZE {
            return Err(Error::InvalidTeam(format!(
                "team size {size} exceeds {MAX_TEAM_SIZE}"
            )));
        }
        if members.len() != size {
            return Err(Error::InvalidTeam(format!(
                "expected {size} members, got {}",
                members.len()
            )));
        }
        for (i, m) in members.iter().enumerate() {
            m.validate()?;
            if members[..i].iter().any(|other| other.id == m.id) {
                return Err(Error::InvalidTeam(format!("unit {} appears twice", m.id)));
            }
        }
        Ok(Self { members })
    }

    pub fn members(&self) -> &[Arc<Unit>] {
        &self.members
    }

    pub fn member(&self, position: usize) -> Option<&Arc<Unit>> {
        self.members.get(position)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member ids in line-up order.
    pub fn ids(&self) -> Vec<UnitId> {
        self.members.iter().map(|m| m.id).collect()
    }

    pub fn contains(&self, id: UnitId) -> bool {
        self.members.iter().any(|m| m.id == id)
    }

    /// Sum of attack, special attack, defense and special defense over all members.
    pub fn stats_sum(&self) -> u32 {
        self.members.iter().map(|m| m.stats.battle_sum()).sum()
    }

    /// Base HP of each member, in line-up order.
    pub fn hps(&self) -> Vec<u32> {
        self.members.iter().map(|m| m.stats.hp).collect()
    }

    /// Total base HP.
    pub fn starting_hp(&self) -> u32 {
        self.members.iter().map(|m| m.stats.hp).sum()
    }

    pub fn signature(&self) -> Signature {
        let mut ids = self.ids();
        ids.sort_unstable();
        Signature(ids)
    }

    /// Whether no elemental type repeats across the members.
    pub fn has_unique_types(&self) -> bool {
        types_unique(&self.members)
    }

    /// New team with the member at `position` replaced by `unit`.
    pub fn replace(&self, position: usize, unit: Arc<Unit>) -> Result<Team> {
        if position >= self.members.len() {
            return Err(Error::InvalidTeam(format!(
                "position {position} out of range for team of {}",
                self.members.len()
            )));
        }
        let mut members = self.members.clone();
        members[position] = unit;
        Team::with_size(members, self.members.len())
    }

    /// New team with the members at `a` and `b` exchanged.
    pub fn swap(&self, a: usize, b: usize) -> Result<Team> {
        let n = self.members.len();
        if a >= n || b >= n {
            return Err(Error::InvalidTeam(format!(
                "swap positions ({a}, {b}) out of range for team of {n}"
            )));
        }
        let mut members = self.members.clone();
        members.swap(a, b);
        Ok(Team { members })
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Team[")?;
        for (i, m) in self.members.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(&m.name)?;
        }
        f.write_str("]")
    }
}

/// Legality predicate: no elemental type (primary or secondary) appears on
/// more than one member, or twice on the same member.
pub fn types_unique(members: &[Arc<Unit>]) -> bool {
    let mut seen = 0u32;
    for t in members.iter().flat_map(|m| m.types()) {
        let bit = 1u32 << t.index();
        if seen & bit != 0 {
            return false;
        }
        seen |= bit;
    }
    true
}
