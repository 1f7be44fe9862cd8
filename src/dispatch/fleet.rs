//! Fleet composition: ship class -> count. Zero counts are kept but never evaluated.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dispatch::error::MissionError;
use crate::dispatch::rules::ShipKind;

/// A ship line as it arrives from callers: raw object id plus count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipEntry {
    pub ship: u16,
    pub count: u64,
}

/// Typed line used in responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FleetLine {
    pub id: u16,
    pub ship: ShipKind,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FleetComposition {
    ships: BTreeMap<ShipKind, u64>,
}

impl FleetComposition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, ship: ShipKind, count: u64) -> Self {
        self.set(ship, count);
        self
    }

    pub fn set(&mut self, ship: ShipKind, count: u64) {
        self.ships.insert(ship, count);
    }

    pub fn count(&self, ship: ShipKind) -> u64 {
        self.ships.get(&ship).copied().unwrap_or(0)
    }

    /// Ships with a positive count, in id order.
    pub fn active(&self) -> impl Iterator<Item = (ShipKind, u64)> + '_ {
        self.ships
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(ship, count)| (*ship, *count))
    }

    /// True when no ship has a positive count.
    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }

    pub fn total_ships(&self) -> u64 {
        self.active().map(|(_, count)| count).sum()
    }

    /// Build from raw id/count lines. Unknown ids fail fast; repeated ids add up.
    pub fn from_entries(entries: &[ShipEntry]) -> Result<Self, MissionError> {
        let mut fleet = Self::new();
        for entry in entries {
            let ship = ShipKind::from_id(entry.ship).ok_or(MissionError::UnknownShipKind(entry.ship))?;
            let total = fleet.count(ship).saturating_add(entry.count);
            fleet.set(ship, total);
        }
        Ok(fleet)
    }

    /// Limit each requested count to what is available. Ships not available are dropped.
    pub fn clamp_to(&self, available: &FleetComposition) -> FleetComposition {
        let ships = self
            .active()
            .filter_map(|(ship, requested)| {
                let docked = available.count(ship);
                (docked > 0).then(|| (ship, requested.min(docked)))
            })
            .collect();
        FleetComposition { ships }
    }

    pub fn lines(&self) -> Vec<FleetLine> {
        self.active()
            .map(|(ship, count)| FleetLine {
                id: ship.id(),
                ship,
                count,
            })
            .collect()
    }
}

impl FromIterator<(ShipKind, u64)> for FleetComposition {
    fn from_iter<I: IntoIterator<Item = (ShipKind, u64)>>(iter: I) -> Self {
        let mut fleet = Self::new();
        for (ship, count) in iter {
            let total = fleet.count(ship).saturating_add(count);
            fleet.set(ship, total);
        }
        fleet
    }
}
