//! The read-only unit catalog.

use super::types::{Unit, UnitId};
use crate::error::{Error, Result};
use std::collections::HashSet;
use std::sync::Arc;

/// Validated, immutable collection of units.
///
/// Units are held behind [`Arc`] so teams can share them without copying
/// stat tables; the catalog itself is never mutated after construction and
/// can be shared freely across concurrent solver runs.
#[derive(Debug, Clone)]
pub struct Catalog {
    units: Vec<Arc<Unit>>,
}

impl Catalog {
    /// Builds a catalog, validating every unit and rejecting duplicate ids.
    pub fn new(units: Vec<Unit>) -> Result<Self> {
        if units.is_empty() {
            return Err(Error::config("catalog must contain at least one unit"));
        }
        let mut seen = HashSet::with_capacity(units.len());
        for unit in &units {
            unit.validate()?;
            if !seen.insert(unit.id) {
                return Err(Error::InvalidUnit {
                    id: unit.id.0,
                    reason: "duplicate id in catalog".into(),
                });
            }
        }
        Ok(Self {
            units: units.into_iter().map(Arc::new).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Units in catalog order.
    pub fn units(&self) -> &[Arc<Unit>] {
        &self.units
    }

    pub fn get(&self, id: UnitId) -> Option<&Arc<Unit>> {
        self.units.iter().find(|u| u.id == id)
    }

    /// Units whose id is not in `ids`, in catalog order.
    pub fn excluding(&self, ids: &[UnitId]) -> Vec<Arc<Unit>> {
        self.units
            .iter()
            .filter(|u| !ids.contains(&u.id))
            .cloned()
            .collect()
    }
}
