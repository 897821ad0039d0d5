//! Deterministic turn-based combat.
//!
//! A battle pits the ordered line-up of side A (the team being evaluated)
//! against side B until one side is out of members, one side is stranded
//! by immunity, or the step cap is hit. It takes no randomness and never
//! changes the teams it is given.
//!
//! # Key Types
//!
//! - [`CombatRules`]: the injected formulas, step cap and [`TimeoutPolicy`]
//! - [`Battle`]: step-level state machine, for callers that want to observe strikes
//! - [`BattleOutcome`]: remaining HP per side and why the battle ended
//!
//! # Formulas
//!
//! - [`TypeMultiplier`]: [`MinMultiplier`], [`MaxMultiplier`], [`ProductMultiplier`]
//! - [`DamageFormula`]: [`AttackMinusDefense`], [`AttackOverDefense`]

mod engine;
mod formulas;
mod rules;

pub use engine::{battle, Battle, BattleOutcome, Side, StepEvent, Termination};
pub use formulas::{
    AttackMinusDefense, AttackOverDefense, DamageFormula, MaxMultiplier, MinMultiplier,
    ProductMultiplier, TypeMultiplier,
};
pub use rules::{CombatRules, TimeoutPolicy, MAX_STEPS_PER_BATTLE};
