//! Pluggable combat formulas.
//!
//! Two seams are injected into every battle:
//!
//! - [`TypeMultiplier`] folds the two effectiveness values looked up for a
//!   strike (attacker primary type, attacker secondary type or `1.0`) into a
//!   single multiplier.
//! - [`DamageFormula`] turns combined attack, combined defense and that
//!   multiplier into raw damage. The engine clamps the result to at least 1.
//!
//! Both traits are implemented for plain closures, so ad-hoc formulas need
//! no wrapper type.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Combines two per-type effectiveness values into one multiplier.
pub trait TypeMultiplier: Send + Sync {
    fn combine(&self, first: f64, second: f64) -> f64;
}

impl<F> TypeMultiplier for F
where
    F: Fn(f64, f64) -> f64 + Send + Sync,
{
    fn combine(&self, first: f64, second: f64) -> f64 {
        self(first, second)
    }
}

/// Computes raw damage from combined stats and the type multiplier.
///
/// May return zero or negative values; the engine floors damage at 1.
pub trait DamageFormula: Send + Sync {
    fn damage(&self, attack: u32, defense: u32, multiplier: f64) -> i64;
}

impl<F> DamageFormula for F
where
    F: Fn(u32, u32, f64) -> i64 + Send + Sync,
{
    fn damage(&self, attack: u32, defense: u32, multiplier: f64) -> i64 {
        self(attack, defense, multiplier)
    }
}

/// The smaller of the two effectiveness values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MinMultiplier;

impl TypeMultiplier for MinMultiplier {
    fn combine(&self, first: f64, second: f64) -> f64 {
        first.min(second)
    }
}

/// The larger of the two effectiveness values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MaxMultiplier;

impl TypeMultiplier for MaxMultiplier {
    fn combine(&self, first: f64, second: f64) -> f64 {
        first.max(second)
    }
}

/// Product of the two effectiveness values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProductMultiplier;

impl TypeMultiplier for ProductMultiplier {
    fn combine(&self, first: f64, second: f64) -> f64 {
        first * second
    }
}

/// `attack * multiplier - defense`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AttackMinusDefense;

impl DamageFormula for AttackMinusDefense {
    fn damage(&self, attack: u32, defense: u32, multiplier: f64) -> i64 {
        to_damage(attack as f64 * multiplier - defense as f64)
    }
}

/// `(attack / defense) * multiplier`; a zero defense divides by one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AttackOverDefense;

impl DamageFormula for AttackOverDefense {
    fn damage(&self, attack: u32, defense: u32, multiplier: f64) -> i64 {
        if defense == 0 {
            return to_damage(attack as f64 * multiplier);
        }
        to_damage(attack as f64 / defense as f64 * multiplier)
    }
}

/// Rounds to one decimal, then truncates toward zero.
fn to_damage(raw: f64) -> i64 {
    ((raw * 10.0).round() / 10.0) as i64
}
