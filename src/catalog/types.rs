//! Unit data model: elemental types, base stats and effectiveness tables.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Closed enumeration of elemental types.
///
/// The declaration order fixes the index used by [`Effectiveness`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ElementType {
    Bug,
    Dark,
    Dragon,
    Electric,
    Fairy,
    Fighting,
    Fire,
    Flying,
    Ghost,
    Grass,
    Ground,
    Ice,
    Normal,
    Poison,
    Psychic,
    Rock,
    Steel,
    Water,
}

impl ElementType {
    /// Number of elemental types.
    pub const COUNT: usize = 18;

    /// All types in index order.
    pub const ALL: [ElementType; Self::COUNT] = [
        ElementType::Bug,
        ElementType::Dark,
        ElementType::Dragon,
        ElementType::Electric,
        ElementType::Fairy,
        ElementType::Fighting,
        ElementType::Fire,
        ElementType::Flying,
        ElementType::Ghost,
        ElementType::Grass,
        ElementType::Ground,
        ElementType::Ice,
        ElementType::Normal,
        ElementType::Poison,
        ElementType::Psychic,
        ElementType::Rock,
        ElementType::Steel,
        ElementType::Water,
    ];

    /// Position of this type in an effectiveness table.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lowercase name, as used in tabular catalogs.
    pub fn name(self) -> &'static str {
        match self {
            ElementType::Bug => "bug",
            ElementType::Dark => "dark",
            ElementType::Dragon => "dragon",
            ElementType::Electric => "electric",
            ElementType::Fairy => "fairy",
            ElementType::Fighting => "fighting",
            ElementType::Fire => "fire",
            ElementType::Flying => "flying",
            ElementType::Ghost => "ghost",
            ElementType::Grass => "grass",
            ElementType::Ground => "ground",
            ElementType::Ice => "ice",
            ElementType::Normal => "normal",
            ElementType::Poison => "poison",
            ElementType::Psychic => "psychic",
            ElementType::Rock => "rock",
            ElementType::Steel => "steel",
            ElementType::Water => "water",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        ElementType::ALL
            .into_iter()
            .find(|t| t.name() == lower)
            .ok_or_else(|| Error::config(format!("unknown element type '{s}'")))
    }
}

/// Catalog identity of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Largest accepted value of a single base stat.
///
/// With teams capped at `team::MAX_TEAM_SIZE` members, every stat sum of a
/// unit or team fits in a `u32`.
pub const MAX_STAT: u32 = u16::MAX as u32;

/// The six base stats of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BaseStats {
    pub hp: u32,
    pub attack: u32,
    pub special_attack: u32,
    pub defense: u32,
    pub special_defense: u32,
    pub speed: u32,
}

impl BaseStats {
    /// Attack plus special attack.
    pub fn combined_attack(&self) -> u32 {
        self.attack + self.special_attack
    }

    /// Defense plus special defense.
    pub fn combined_defense(&self) -> u32 {
        self.defense + self.special_defense
    }

    /// Sum of the four battle stats (HP and speed excluded).
    pub fn battle_sum(&self) -> u32 {
        self.combined_attack() + self.combined_defense()
    }

    fn iter(&self) -> [(&'static str, u32); 6] {
        [
            ("hp", self.hp),
            ("attack", self.attack),
            ("special_attack", self.special_attack),
            ("defense", self.defense),
            ("special_defense", self.special_defense),
            ("speed", self.speed),
        ]
    }
}

/// Damage multipliers a unit receives, indexed by the attacking type.
///
/// `0.0` means immune, `1.0` neutral, values above `1.0` super-effective.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Effectiveness([f64; ElementType::COUNT]);

impl Effectiveness {
    /// Table with every entry equal to `1.0`.
    pub fn neutral() -> Self {
        Self([1.0; ElementType::COUNT])
    }

    /// Wraps a raw table.
    pub fn from_array(values: [f64; ElementType::COUNT]) -> Self {
        Self(values)
    }

    /// Returns a copy with the multiplier against `attacking` replaced.
    pub fn with(mut self, attacking: ElementType, multiplier: f64) -> Self {
        self.0[attacking.index()] = multiplier;
        self
    }

    /// Multiplier received from an attacker of the given type.
    pub fn against(&self, attacking: ElementType) -> f64 {
        self.0[attacking.index()]
    }

    /// Raw table in [`ElementType::ALL`] order.
    pub fn as_array(&self) -> &[f64; ElementType::COUNT] {
        &self.0
    }
}

impl Default for Effectiveness {
    fn default() -> Self {
        Self::neutral()
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub primary: ElementType,
    pub secondary: Option<ElementType>,
    pub stats: BaseStats,
    pub effectiveness: Effectiveness,
}

impl Unit {
    /// Builds a unit and checks its invariants.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        primary: ElementType,
        secondary: Option<ElementType>,
        stats: BaseStats,
        effectiveness: Effectiveness,
    ) -> Result<Self> {
        let unit = Self {
            id: UnitId(id),
            name: name.into(),
            primary,
            secondary,
            stats,
            effectiveness,
        };
        unit.validate()?;
        Ok(unit)
    }

    /// Checks the unit invariants: non-empty name, every stat in
    /// `1..=MAX_STAT`, every multiplier finite and non-negative, distinct
    /// types.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| Error::InvalidUnit {
            id: self.id.0,
            reason,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name must not be empty".into()));
        }
        for (stat, value) in self.stats.iter() {
            if value == 0 {
                return Err(invalid(format!("{stat} must be at least 1")));
            }
            if value > MAX_STAT {
                return Err(invalid(format!("{stat} must be at most {MAX_STAT}, got {value}")));
            }
        }
        for (t, &m) in ElementType::ALL.iter().zip(self.effectiveness.as_array()) {
            if !m.is_finite() || m < 0.0 {
                return Err(invalid(format!(
                    "effectiveness against {t} must be finite and non-negative, got {m}"
                )));
            }
        }
        if self.secondary == Some(self.primary) {
            return Err(invalid("secondary type repeats the primary type".into()));
        }
        Ok(())
    }

    /// Primary type, followed by the secondary type when present.
    pub fn types(&self) -> impl Iterator<Item = ElementType> {
        std::iter::once(self.primary).chain(self.secondary)
    }

    /// Multiplier this unit receives from an attacker of the given type.
    pub fn effectiveness_against(&self, attacking: ElementType) -> f64 {
        self.effectiveness.against(attacking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> BaseStats {
        BaseStats {
            hp: 50,
            attack: 40,
            special_attack: 30,
            defense: 20,
            special_defense: 10,
            speed: 60,
        }
    }

    #[test]
    fn test_type_index_matches_all_order() {
        for (i, t) in ElementType::ALL.iter().enumerate() {
            assert_eq!(t.index(), i);
        }
    }

    #[test]
    fn test_type_parse_roundtrip_names() {
        assert_eq!("Fire".parse::<ElementType>().unwrap(), ElementType::Fire);
        assert_eq!(" water ".parse::<ElementType>().unwrap(), ElementType::Water);
        assert!("shadow".parse::<ElementType>().is_err());
        assert_eq!(ElementType::Psychic.to_string(), "psychic");
    }

    #[test]
    fn test_stat_sums() {
        let s = stats();
        assert_eq!(s.combined_attack(), 70);
        assert_eq!(s.combined_defense(), 30);
        assert_eq!(s.battle_sum(), 100);
    }

    #[test]
    fn test_unit_new_ok() {
        let unit = Unit::new(
            1,
            "Emberling",
            ElementType::Fire,
            Some(ElementType::Flying),
            stats(),
            Effectiveness::neutral().with(ElementType::Water, 2.0),
        )
        .unwrap();
        assert_eq!(unit.effectiveness_against(ElementType::Water), 2.0);
        assert_eq!(unit.effectiveness_against(ElementType::Grass), 1.0);
        assert_eq!(
            unit.types().collect::<Vec<_>>(),
            vec![ElementType::Fire, ElementType::Flying]
        );
    }

    #[test]
    fn test_unit_rejects_zero_stat() {
        let mut s = stats();
        s.speed = 0;
        let err = Unit::new(7, "Sloth", ElementType::Normal, None, s, Effectiveness::neutral())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidUnit { id: 7, .. }));
    }

    #[test]
    fn test_unit_stat_upper_bound() {
        let mut s = stats();
        s.hp = MAX_STAT;
        assert!(Unit::new(8, "Titan", ElementType::Rock, None, s, Effectiveness::neutral()).is_ok());

        s.hp = 1_000_000_000;
        let err = Unit::new(8, "Titan", ElementType::Rock, None, s, Effectiveness::neutral())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidUnit { id: 8, .. }));
    }

    #[test]
    fn test_unit_rejects_negative_effectiveness() {
        let eff = Effectiveness::neutral().with(ElementType::Ice, -0.5);
        assert!(Unit::new(2, "Frost", ElementType::Ice, None, stats(), eff).is_err());

        let eff = Effectiveness::neutral().with(ElementType::Ice, f64::NAN);
        assert!(Unit::new(2, "Frost", ElementType::Ice, None, stats(), eff).is_err());
    }

    #[test]
    fn test_unit_rejects_repeated_type_and_blank_name() {
        assert!(Unit::new(
            3,
            "Twin",
            ElementType::Rock,
            Some(ElementType::Rock),
            stats(),
            Effectiveness::neutral()
        )
        .is_err());
        assert!(Unit::new(4, "  ", ElementType::Rock, None, stats(), Effectiveness::neutral()).is_err());
    }
}
