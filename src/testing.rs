//! Shared fixtures for unit tests.

use crate::catalog::{BaseStats, Catalog, Effectiveness, ElementType, Unit};
use crate::team::Team;
use std::sync::Arc;

pub(crate) fn stats(hp: u32, attack: u32, defense: u32, speed: u32) -> BaseStats {
    BaseStats {
        hp,
        attack,
        special_attack: attack,
        defense,
        special_defense: defense,
        speed,
    }
}

pub(crate) fn unit(id: u32, primary: ElementType, secondary: Option<ElementType>) -> Unit {
    Unit::new(
        id,
        format!("unit-{id}"),
        primary,
        secondary,
        stats(40 + id * 3, 20 + (id * 7) % 23, 10 + (id * 5) % 17, 10 + (id * 11) % 31),
        Effectiveness::neutral(),
    )
    .unwrap()
}

pub(crate) fn custom_unit(
    id: u32,
    primary: ElementType,
    stats: BaseStats,
    effectiveness: Effectiveness,
) -> Arc<Unit> {
    Arc::new(Unit::new(id, format!("unit-{id}"), primary, None, stats, effectiveness).unwrap())
}

/// `n` single-typed units with ids `1..=n`, cycling through every type.
pub(crate) fn sample_catalog(n: u32) -> Catalog {
    let units = (1..=n)
        .map(|id| unit(id, ElementType::ALL[(id as usize - 1) % ElementType::COUNT], None))
        .collect();
    Catalog::new(units).unwrap()
}

/// Seven units whose only legal six-team is `2..=7`: unit 1 carries both
/// Fire and Water, so drawing it first blocks units 2 and 3.
pub(crate) fn narrow_catalog() -> Catalog {
    use ElementType::*;
    let units = vec![
        unit(1, Fire, Some(Water)),
        unit(2, Fire, None),
        unit(3, Water, None),
        unit(4, Grass, None),
        unit(5, Ice, None),
        unit(6, Rock, None),
        unit(7, Bug, None),
    ];
    Catalog::new(units).unwrap()
}

/// Team of the first `size` catalog units.
pub(crate) fn first_team(catalog: &Catalog, size: usize) -> Team {
    Team::with_size(catalog.units()[..size].to_vec(), size).unwrap()
}
