//! Gear id → bike name lookup.

use crate::domain::{Athlete, GearId};
use std::collections::HashMap;

/// Shown for a ride whose gear is missing or not among the athlete's bikes.
pub const UNKNOWN_BIKE: &str = "???";

/// Bike names keyed by gear id, built once from the athlete profile.
///
/// Lookups never fail. Gear that is no longer on the profile (sold or retired
/// bikes) falls back to a placeholder label.
#[derive(Debug, Clone, Default)]
pub struct BikeRegistry {
    names: HashMap<GearId, String>,
}

impl BikeRegistry {
    pub fn build(athlete: &Athlete) -> Self {
        let names = athlete
            .bikes
            .iter()
            .map(|b| (b.id.clone(), b.name.clone()))
            .collect();
        Self { names }
    }

    /// Bike name for per-ride reports, `"???"` when unknown.
    pub fn lookup(&self, gear_id: Option<&GearId>) -> &str {
        gear_id
            .and_then(|id| self.names.get(id))
            .map_or(UNKNOWN_BIKE, String::as_str)
    }

    /// Bike name for the per-bike summary.
    ///
    /// Gear that is not on the profile is labelled `Retired bike (<id>)` so its
    /// totals stay distinguishable from other retired bikes. Rides with no gear
    /// at all are grouped under `"???"`, the same label [`lookup`](Self::lookup) uses.
    pub fn summary_label(&self, gear_id: Option<&GearId>) -> String {
        match gear_id {
            Some(id) => self
                .names
                .get(id)
                .cloned()
                .unwrap_or_else(|| format!("Retired bike ({id})")),
            None => UNKNOWN_BIKE.to_string(),
        }
    }
}
