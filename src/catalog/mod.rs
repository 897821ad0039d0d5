//! Unit catalog.
//!
//! A [`Catalog`] is the validated, read-only table of candidate [`Unit`]s
//! every team is drawn from. Loading rows from tabular storage happens
//! outside this crate; the catalog only enforces the unit invariants.

mod table;
mod types;

pub use table::Catalog;
pub use types::{BaseStats, Effectiveness, ElementType, Unit, UnitId, MAX_STAT};
