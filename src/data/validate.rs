use std::collections::HashSet;
use std::fmt;

use crate::data::universe::{read_universe, UniverseError, UniverseSnapshot};
use crate::dispatch::{DestinationKind, ShipKind, UniverseLimits};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }
}

pub fn validate_universe_file(path: &str, limits: &UniverseLimits) -> Result<ValidationReport, UniverseError> {
    let universe = read_universe(path)?;
    Ok(validate_universe(&universe, limits))
}

pub fn validate_universe(universe: &UniverseSnapshot, limits: &UniverseLimits) -> ValidationReport {
    let mut report = ValidationReport::default();

    let mut player_ids = HashSet::new();
    for (index, player) in universe.players.iter().enumerate() {
        if !player_ids.insert(player.id) {
            report.push(
                ValidationSeverity::Error,
                format!("players[{index}].id"),
                format!("duplicate player id {}", player.id),
            );
        }
        if player.alliance == Some(0) {
            report.push(
                ValidationSeverity::Warning,
                format!("players[{index}].alliance"),
                "alliance 0 means no alliance; omit the field instead",
            );
        }
    }

    let mut seen_locations = HashSet::new();
    for (index, planet) in universe.planets.iter().enumerate() {
        let context = format!("planets[{index}]");
        let coords = planet.coordinates;

        if !(1..=limits.galaxies).contains(&coords.galaxy)
            || !(1..=limits.systems).contains(&coords.system)
            || !(1..=limits.planets).contains(&coords.planet)
        {
            report.push(
                ValidationSeverity::Error,
                format!("{context}.coordinates"),
                format!(
                    "{}:{}:{} is outside the universe",
                    coords.galaxy, coords.system, coords.planet
                ),
            );
        }

        if DestinationKind::from_id(planet.kind).is_none() {
            report.push(
                ValidationSeverity::Error,
                format!("{context}.kind"),
                format!("unknown destination kind {}", planet.kind),
            );
        }

        if !seen_locations.insert((coords, planet.kind)) {
            report.push(
                ValidationSeverity::Error,
                context.clone(),
                format!(
                    "duplicate location {}:{}:{} kind {}",
                    coords.galaxy, coords.system, coords.planet, planet.kind
                ),
            );
        }

        if !player_ids.contains(&planet.owner) {
            report.push(
                ValidationSeverity::Error,
                format!("{context}.owner"),
                format!("owner {} is not a known player", planet.owner),
            );
        }

        for (ship_index, entry) in planet.ships.iter().enumerate() {
            if ShipKind::from_id(entry.ship).is_none() {
                report.push(
                    ValidationSeverity::Error,
                    format!("{context}.ships[{ship_index}]"),
                    format!("unknown ship id {}", entry.ship),
                );
            }
        }
    }

    for (index, &(a, b)) in universe.buddies.iter().enumerate() {
        if a == b {
            report.push(
                ValidationSeverity::Warning,
                format!("buddies[{index}]"),
                format!("player {a} is listed as their own buddy"),
            );
        }
        for id in [a, b] {
            if !player_ids.contains(&id) {
                report.push(
                    ValidationSeverity::Error,
                    format!("buddies[{index}]"),
                    format!("player {id} is not a known player"),
                );
            }
        }
    }

    for (index, record) in universe.research.iter().enumerate() {
        if !player_ids.contains(&record.player) {
            report.push(
                ValidationSeverity::Warning,
                format!("research[{index}].player"),
                format!("research for unknown player {}", record.player),
            );
        }
    }

    report
}
