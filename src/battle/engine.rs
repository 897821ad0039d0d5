//! Turn-based battle state machine.
//!
//! # Rules
//!
//! 1. Each side fields its first member. The side whose active member is
//!    strictly faster moves first; ties go to side B.
//! 2. A strike uses the attacker's attack + special attack against the
//!    defender's defense + special defense. The multiplier comes from the
//!    defender's effectiveness table at the attacker's primary type and at
//!    its secondary type (or `1.0`), folded by the [`TypeMultiplier`].
//! 3. A zero multiplier deals nothing: the attacker is switched out for its
//!    next living team-mate and the turn passes. With no one left to switch
//!    in, that side is stranded and counts as fully fainted.
//! 4. Otherwise damage is `max(formula, 1)`. A defender brought to 0 HP
//!    faints; the next member comes in and initiative is decided again by
//!    speed. Without a next member the battle is over.
//! 5. A surviving defender simply hands the turn over.
//!
//! The battle only borrows the two teams. HP and line-up order live in a
//! private working copy, so simulation never changes the caller's teams.

use super::formulas::{DamageFormula, TypeMultiplier};
use super::rules::{CombatRules, TimeoutPolicy};
use crate::catalog::Unit;
use crate::team::Team;

/// One of the two combatants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The side being evaluated.
    A,
    /// The opposing side.
    B,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    fn idx(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }
}

/// Why a battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Every member of `loser` fainted.
    Knockout { loser: Side },
    /// `side` could not damage its opponent and had nobody left to switch in.
    Stranded { side: Side },
    /// The step cap was reached with both sides standing.
    StepLimit,
}

/// What a single [`Battle::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    /// `attacker` dealt `damage`; `fainted` is set when the defender dropped to 0.
    Hit {
        attacker: Side,
        damage: u32,
        fainted: bool,
    },
    /// `side` was immune-blocked and switched its active member.
    Switched { side: Side },
    /// `side` was immune-blocked with nobody left to switch in.
    Stranded { side: Side },
}

/// Final state of a battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleOutcome {
    /// HP left per side, indexed A then B. A stranded side reports 0.
    pub remaining: [u32; 2],
    /// Starting HP per side.
    pub starting: [u32; 2],
    /// Steps taken.
    pub steps: usize,
    pub termination: Termination,
}

impl BattleOutcome {
    pub fn remaining_hp(&self, side: Side) -> u32 {
        self.remaining[side.idx()]
    }

    /// Side still standing, or `None` for a step-capped battle.
    pub fn winner(&self) -> Option<Side> {
        match self.termination {
            Termination::Knockout { loser } => Some(loser.opponent()),
            Termination::Stranded { side } => Some(side.opponent()),
            Termination::StepLimit => None,
        }
    }

    /// Remaining HP credited to side A.
    pub fn score(&self, policy: TimeoutPolicy) -> u32 {
        let own = self.remaining[0];
        match (self.termination, policy) {
            (Termination::StepLimit, TimeoutPolicy::Loss) => 0,
            (Termination::StepLimit, TimeoutPolicy::HpComparison) => {
                if own > self.remaining[1] {
                    own
                } else {
                    0
                }
            }
            _ => own,
        }
    }
}

/// Private per-side working state.
#[derive(Debug, Clone)]
struct Lineup<'a> {
    units: Vec<&'a Unit>,
    hp: Vec<u32>,
    active: usize,
    stranded: bool,
}

impl<'a> Lineup<'a> {
    fn new(team: &'a Team) -> Self {
        Self {
            units: team.members().iter().map(|m| m.as_ref()).collect(),
            hp: team.hps(),
            active: 0,
            stranded: false,
        }
    }

    fn active_unit(&self) -> &'a Unit {
        self.units[self.active]
    }

    fn total_hp(&self) -> u32 {
        self.hp.iter().sum()
    }

    fn remaining_hp(&self) -> u32 {
        if self.stranded {
            0
        } else {
            self.total_hp()
        }
    }

    /// Exchanges the active member with the next living one.
    fn switch_to_next_alive(&mut self) -> bool {
        let Some(next) = (self.active + 1..self.units.len()).find(|&i| self.hp[i] > 0) else {
            return false;
        };
        self.units.swap(self.active, next);
        self.hp.swap(self.active, next);
        true
    }
}

/// A battle in progress between side A and side B.
///
/// Drive it with [`step`](Battle::step) to observe individual strikes, or
/// call [`run`](Battle::run) to fight to the end.
pub struct Battle<'a, M, D> {
    rules: &'a CombatRules<M, D>,
    sides: [Lineup<'a>; 2],
    turn: Side,
    steps: usize,
}

impl<'a, M: TypeMultiplier, D: DamageFormula> Battle<'a, M, D> {
    pub fn new(a: &'a Team, b: &'a Team, rules: &'a CombatRules<M, D>) -> Self {
        let mut battle = Self {
            rules,
            sides: [Lineup::new(a), Lineup::new(b)],
            turn: Side::B,
            steps: 0,
        };
        battle.turn = battle.first_attacker();
        battle
    }

    /// Side due to strike next.
    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Line-up position of the member currently fighting for `side`.
    pub fn active(&self, side: Side) -> usize {
        self.sides[side.idx()].active
    }

    pub fn active_unit(&self, side: Side) -> &'a Unit {
        self.sides[side.idx()].active_unit()
    }

    /// Current HP of `side`'s working line-up, in its current order.
    pub fn hp(&self, side: Side) -> &[u32] {
        &self.sides[side.idx()].hp
    }

    /// Terminal condition, if one has been reached.
    pub fn termination(&self) -> Option<Termination> {
        for side in [Side::A, Side::B] {
            if self.sides[side.idx()].stranded {
                return Some(Termination::Stranded { side });
            }
        }
        for side in [Side::A, Side::B] {
            if self.sides[side.idx()].total_hp() == 0 {
                return Some(Termination::Knockout { loser: side });
            }
        }
        if self.steps >= self.rules.max_steps {
            return Some(Termination::StepLimit);
        }
        None
    }

    /// Performs one strike. Returns `None` once the battle is over.
    pub fn step(&mut self) -> Option<StepEvent> {
        if self.termination().is_some() {
            return None;
        }
        self.steps += 1;

        let attacker_side = self.turn;
        let defender_side = attacker_side.opponent();
        let attacker = self.sides[attacker_side.idx()].active_unit();
        let defender = self.sides[defender_side.idx()].active_unit();

        let multiplier = strike_multiplier(&self.rules.multiplier, attacker, defender);
        if multiplier == 0.0 {
            self.turn = defender_side;
            let line = &mut self.sides[attacker_side.idx()];
            if line.switch_to_next_alive() {
                return Some(StepEvent::Switched {
                    side: attacker_side,
                });
            }
            line.stranded = true;
            return Some(StepEvent::Stranded {
                side: attacker_side,
            });
        }

        let raw = self.rules.damage.damage(
            attacker.stats.combined_attack(),
            defender.stats.combined_defense(),
            multiplier,
        );
        let damage = u32::try_from(raw.max(1)).unwrap_or(u32::MAX);

        let line = &mut self.sides[defender_side.idx()];
        let hp = &mut line.hp[line.active];
        if *hp > damage {
            *hp -= damage;
            self.turn = defender_side;
            return Some(StepEvent::Hit {
                attacker: attacker_side,
                damage,
                fainted: false,
            });
        }

        *hp = 0;
        if line.active + 1 < line.units.len() {
            line.active += 1;
            self.turn = self.first_attacker();
        }
        Some(StepEvent::Hit {
            attacker: attacker_side,
            damage,
            fainted: true,
        })
    }

    /// Fights until a terminal condition and reports the result.
    pub fn run(mut self) -> BattleOutcome {
        while self.step().is_some() {}
        self.outcome()
    }

    /// Snapshot of the current state as an outcome.
    ///
    /// The termination of an unfinished battle is reported as
    /// [`Termination::StepLimit`].
    pub fn outcome(&self) -> BattleOutcome {
        let [a, b] = &self.sides;
        BattleOutcome {
            remaining: [a.remaining_hp(), b.remaining_hp()],
            starting: [
                a.units.iter().map(|u| u.stats.hp).sum(),
                b.units.iter().map(|u| u.stats.hp).sum(),
            ],
            steps: self.steps,
            termination: self.termination().unwrap_or(Termination::StepLimit),
        }
    }

    fn first_attacker(&self) -> Side {
        let a = self.sides[0].active_unit().stats.speed;
        let b = self.sides[1].active_unit().stats.speed;
        if a > b {
            Side::A
        } else {
            Side::B
        }
    }
}

/// Multiplier for `attacker` striking `defender`.
fn strike_multiplier<M: TypeMultiplier>(multiplier: &M, attacker: &Unit, defender: &Unit) -> f64 {
    let first = defender.effectiveness_against(attacker.primary);
    let second = attacker
        .secondary
        .map_or(1.0, |t| defender.effectiveness_against(t));
    multiplier.combine(first, second)
}

/// Fights `a` against `b` and returns `a`'s remaining HP under `rules`.
pub fn battle<M: TypeMultiplier, D: DamageFormula>(
    a: &Team,
    b: &Team,
    rules: &CombatRules<M, D>,
) -> u32 {
    rules.remaining_hp(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::{AttackMinusDefense, MaxMultiplier, MinMultiplier, ProductMultiplier};
    use crate::catalog::{Effectiveness, ElementType};
    use crate::team::generate_team;
    use crate::testing::{custom_unit, sample_catalog, stats};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn rules() -> CombatRules<ProductMultiplier, AttackMinusDefense> {
        CombatRules::new(ProductMultiplier, AttackMinusDefense)
    }

    fn team(units: Vec<Arc<Unit>>) -> Team {
        let n = units.len();
        Team::with_size(units, n).unwrap()
    }

    fn plain(id: u32, primary: ElementType, hp: u32, attack: u32, defense: u32, speed: u32) -> Arc<Unit> {
        custom_unit(id, primary, stats(hp, attack, defense, speed), Effectiveness::neutral())
    }

    #[test]
    fn test_faster_side_moves_first() {
        let a = team(vec![plain(1, ElementType::Fire, 50, 30, 10, 90)]);
        let b = team(vec![plain(2, ElementType::Water, 50, 30, 10, 40)]);
        let rules = rules();
        assert_eq!(Battle::new(&a, &b, &rules).turn(), Side::A);
        assert_eq!(Battle::new(&b, &a, &rules).turn(), Side::B);
    }

    #[test]
    fn test_speed_tie_goes_to_side_b() {
        let catalog = sample_catalog(8);
        let a = crate::testing::first_team(&catalog, 6);
        let a_copy = a.clone();
        let rules = rules();
        assert_eq!(Battle::new(&a, &a_copy, &rules).turn(), Side::B);
    }

    #[test]
    fn test_lookup_uses_defender_table_at_attacker_types() {
        let attacker = Arc::new(
            Unit::new(
                1,
                "dual",
                ElementType::Fire,
                Some(ElementType::Flying),
                stats(100, 30, 10, 90),
                Effectiveness::neutral(),
            )
            .unwrap(),
        );
        let defender = custom_unit(
            2,
            ElementType::Grass,
            stats(500, 10, 10, 10),
            Effectiveness::neutral()
                .with(ElementType::Fire, 2.0)
                .with(ElementType::Flying, 0.5),
        );
        let a = team(vec![attacker]);
        let b = team(vec![defender]);

        // combined attack 60, combined defense 20
        let product = CombatRules::new(ProductMultiplier, AttackMinusDefense);
        let min = CombatRules::new(MinMultiplier, AttackMinusDefense);
        let max = CombatRules::new(MaxMultiplier, AttackMinusDefense);

        let hit = |event: Option<StepEvent>| match event {
            Some(StepEvent::Hit { damage, .. }) => damage,
            other => panic!("expected a hit, got {other:?}"),
        };
        assert_eq!(hit(Battle::new(&a, &b, &product).step()), 40);
        assert_eq!(hit(Battle::new(&a, &b, &min).step()), 10);
        assert_eq!(hit(Battle::new(&a, &b, &max).step()), 100);
    }

    #[test]
    fn test_immune_defender_forces_switch() {
        let ghost = plain(1, ElementType::Ghost, 60, 30, 10, 90);
        let backup = plain(2, ElementType::Fire, 70, 30, 10, 20);
        let wall = custom_unit(
            3,
            ElementType::Normal,
            stats(80, 30, 10, 50),
            Effectiveness::neutral().with(ElementType::Ghost, 0.0),
        );
        let a = team(vec![ghost, backup]);
        let b = team(vec![wall]);
        let rules = rules();

        let mut battle = Battle::new(&a, &b, &rules);
        assert_eq!(battle.turn(), Side::A);
        assert_eq!(battle.step(), Some(StepEvent::Switched { side: Side::A }));
        assert_eq!(battle.active_unit(Side::A).id.0, 2);
        assert_eq!(battle.active(Side::A), 0);
        assert_eq!(battle.hp(Side::A), &[70, 60]);
        assert_eq!(battle.hp(Side::B), &[80]);
        assert_eq!(battle.turn(), Side::B);

        // The caller's team keeps its order.
        assert_eq!(a.member(0).unwrap().id.0, 1);
    }

    #[test]
    fn test_stranded_side_counts_as_fainted() {
        let ghost = plain(1, ElementType::Ghost, 60, 30, 10, 90);
        let wall = custom_unit(
            2,
            ElementType::Normal,
            stats(80, 30, 10, 50),
            Effectiveness::neutral().with(ElementType::Ghost, 0.0),
        );
        let rules = rules();

        let a = team(vec![ghost.clone()]);
        let b = team(vec![wall.clone()]);
        let outcome = Battle::new(&a, &b, &rules).run();
        assert_eq!(outcome.termination, Termination::Stranded { side: Side::A });
        assert_eq!(outcome.steps, 1);
        assert_eq!(outcome.score(TimeoutPolicy::Loss), 0);
        assert_eq!(outcome.winner(), Some(Side::B));

        // Stranding the opponent is a win that keeps our HP.
        let a = team(vec![wall]);
        let b = team(vec![ghost]);
        let outcome = Battle::new(&a, &b, &rules).run();
        assert_eq!(outcome.termination, Termination::Stranded { side: Side::B });
        assert_eq!(outcome.score(TimeoutPolicy::Loss), 80);
    }

    #[test]
    fn test_exact_lethal_damage_faints_and_advances() {
        // 2 * 30 - 2 * 10 = 40 damage against exactly 40 HP.
        let striker = plain(1, ElementType::Fire, 100, 30, 10, 90);
        let target = plain(2, ElementType::Water, 40, 10, 10, 10);
        let reserve = plain(3, ElementType::Grass, 50, 10, 10, 95);
        let a = team(vec![striker]);
        let b = team(vec![target, reserve]);
        let rules = rules();

        let mut battle = Battle::new(&a, &b, &rules);
        assert_eq!(
            battle.step(),
            Some(StepEvent::Hit {
                attacker: Side::A,
                damage: 40,
                fainted: true
            })
        );
        assert_eq!(battle.hp(Side::B), &[0, 50]);
        assert_eq!(battle.active(Side::B), 1);
        // Initiative is re-evaluated: the reserve is faster.
        assert_eq!(battle.turn(), Side::B);
    }

    #[test]
    fn test_damage_floor_is_one() {
        let weak = plain(1, ElementType::Bug, 100, 5, 10, 90);
        let tank = plain(2, ElementType::Rock, 100, 5, 90, 10);
        let a = team(vec![weak]);
        let b = team(vec![tank]);
        let rules = rules();

        let mut battle = Battle::new(&a, &b, &rules);
        assert_eq!(
            battle.step(),
            Some(StepEvent::Hit {
                attacker: Side::A,
                damage: 1,
                fainted: false
            })
        );
        assert_eq!(battle.hp(Side::B), &[99]);
        assert_eq!(battle.turn(), Side::B);
    }

    #[test]
    fn test_knockout() {
        let strong = plain(1, ElementType::Dragon, 200, 60, 30, 90);
        let weak = plain(2, ElementType::Bug, 30, 5, 5, 10);
        let weaker = plain(3, ElementType::Ice, 20, 5, 5, 10);
        let a = team(vec![strong]);
        let b = team(vec![weak, weaker]);
        let outcome = rules().battle(&a, &b);

        assert_eq!(outcome.termination, Termination::Knockout { loser: Side::B });
        assert_eq!(outcome.remaining_hp(Side::B), 0);
        assert_eq!(outcome.remaining_hp(Side::A), 200);
        assert_eq!(outcome.starting, [200, 50]);
        assert_eq!(battle(&a, &b, &rules()), 200);
    }

    #[test]
    fn test_step_limit_policies() {
        // Both sides deal 1 damage per strike; 10 steps cannot finish.
        let a = team(vec![plain(1, ElementType::Bug, 500, 5, 90, 20)]);
        let b = team(vec![plain(2, ElementType::Rock, 400, 5, 90, 10)]);
        let rules = rules().with_max_steps(10);

        let outcome = rules.battle(&a, &b);
        assert_eq!(outcome.termination, Termination::StepLimit);
        assert_eq!(outcome.steps, 10);
        assert_eq!(outcome.remaining, [495, 395]);
        assert_eq!(outcome.winner(), None);

        assert_eq!(outcome.score(TimeoutPolicy::Loss), 0);
        assert_eq!(outcome.score(TimeoutPolicy::HpComparison), 495);
        assert_eq!(outcome.score(TimeoutPolicy::Proportional), 495);
        assert_eq!(rules.remaining_hp(&a, &b), 0);

        let reversed = rules.battle(&b, &a);
        assert_eq!(reversed.score(TimeoutPolicy::HpComparison), 0);
        assert_eq!(reversed.score(TimeoutPolicy::Proportional), 395);
    }

    #[test]
    fn test_step_after_end_is_none() {
        let a = team(vec![plain(1, ElementType::Dragon, 200, 60, 30, 90)]);
        let b = team(vec![plain(2, ElementType::Bug, 10, 5, 5, 10)]);
        let rules = rules();
        let mut battle = Battle::new(&a, &b, &rules);
        assert!(battle.step().is_some());
        assert_eq!(battle.step(), None);
        assert_eq!(
            battle.termination(),
            Some(Termination::Knockout { loser: Side::B })
        );
    }

    proptest! {
        #[test]
        fn prop_battle_is_deterministic(seed in any::<u64>()) {
            let catalog = sample_catalog(20);
            let mut rng = StdRng::seed_from_u64(seed);
            let a = generate_team(&catalog, 6, true, &mut rng).unwrap();
            let b = generate_team(&catalog, 6, true, &mut rng).unwrap();
            let before = a.clone();

            let rules = CombatRules::default();
            let first = rules.battle(&a, &b);
            let second = rules.battle(&a, &b);
            prop_assert_eq!(&first, &second);
            prop_assert!(first.remaining_hp(Side::A) <= a.starting_hp());
            prop_assert_eq!(a, before);
        }
    }
}
