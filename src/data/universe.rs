//! Universe snapshot: a JSON fixture of players, planets, buddy pairs, ACS groups and
//! research levels. Implements every dispatch collaborator, so the CLI and the local
//! server can plan dispatches without a database.

use std::fs;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::dispatch::{
    AcsRegistry, AllianceId, Coordinates, DestinationKind, Diplomacy, FleetComposition,
    FlightComputer, PlanetDirectory, PlanetOwner, PlayerId, ResearchLedger, ShipEntry, ShipKind,
};

pub const DEFAULT_UNIVERSE_PATH: &str = "data/universe.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub alliance: Option<AllianceId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanetRecord {
    pub coordinates: Coordinates,
    /// 1 = planet, 2 = debris field, 3 = moon.
    #[serde(default = "default_kind_id")]
    pub kind: u8,
    pub owner: PlayerId,
    #[serde(default)]
    pub ships: Vec<ShipEntry>,
}

fn default_kind_id() -> u8 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcsGroupRecord {
    pub id: u64,
    pub fleets: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchRecord {
    pub player: PlayerId,
    #[serde(default)]
    pub astrophysics: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UniverseSnapshot {
    #[serde(default)]
    pub players: Vec<PlayerRecord>,
    #[serde(default)]
    pub planets: Vec<PlanetRecord>,
    #[serde(default)]
    pub buddies: Vec<(PlayerId, PlayerId)>,
    #[serde(default)]
    pub acs_groups: Vec<AcsGroupRecord>,
    #[serde(default)]
    pub research: Vec<ResearchRecord>,
}

impl UniverseSnapshot {
    pub fn player(&self, id: PlayerId) -> Option<&PlayerRecord> {
        self.players.iter().find(|p| p.id == id)
    }

    fn planet(&self, coords: Coordinates, kind: DestinationKind) -> Option<&PlanetRecord> {
        let kind_id = kind.id()?;
        self.planets
            .iter()
            .find(|p| p.coordinates == coords && p.kind == kind_id)
    }
}

impl PlanetDirectory for UniverseSnapshot {
    fn owner_at(&self, coords: Coordinates, kind: DestinationKind) -> Option<PlanetOwner> {
        let planet = self.planet(coords, kind)?;
        Some(PlanetOwner {
            player: planet.owner,
            alliance: self.player(planet.owner).and_then(|p| p.alliance),
        })
    }

    /// Unknown ship ids are skipped here; `validate_universe` reports them.
    fn docked_ships(&self, coords: Coordinates, kind: DestinationKind) -> FleetComposition {
        self.planet(coords, kind)
            .map(|planet| {
                planet
                    .ships
                    .iter()
                    .filter_map(|entry| ShipKind::from_id(entry.ship).map(|ship| (ship, entry.count)))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Diplomacy for UniverseSnapshot {
    fn are_buddies(&self, a: PlayerId, b: PlayerId) -> bool {
        self.buddies
            .iter()
            .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
    }
}

impl AcsRegistry for UniverseSnapshot {
    fn grouped_fleets(&self, group: u64) -> u32 {
        self.acs_groups
            .iter()
            .find(|g| g.id == group)
            .map_or(0, |g| g.fleets)
    }
}

impl ResearchLedger for UniverseSnapshot {
    fn astrophysics_level(&self, player: PlayerId) -> u32 {
        self.research
            .iter()
            .find(|r| r.player == player)
            .map_or(0, |r| r.astrophysics)
    }
}

impl FlightComputer for UniverseSnapshot {
    fn distance(&self, origin: Coordinates, target: Coordinates) -> u64 {
        let galaxies = u64::from(origin.galaxy.abs_diff(target.galaxy));
        let systems = u64::from(origin.system.abs_diff(target.system));
        let planets = u64::from(origin.planet.abs_diff(target.planet));
        if galaxies != 0 {
            galaxies * 20_000
        } else if systems != 0 {
            systems * 95 + 2_700
        } else if planets != 0 {
            planets * 5 + 1_000
        } else {
            5
        }
    }
}

#[derive(Debug, Error)]
pub enum UniverseError {
    #[error("unable to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to parse json '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Read and parse a snapshot, reporting why it could not be loaded.
pub fn read_universe(path: &str) -> Result<UniverseSnapshot, UniverseError> {
    let raw = fs::read_to_string(path).map_err(|source| UniverseError::Read {
        path: path.to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| UniverseError::Parse {
        path: path.to_string(),
        source,
    })
}

/// Load a snapshot. Returns an empty universe if the file is missing or invalid.
pub fn load_universe(path: &str) -> UniverseSnapshot {
    match read_universe(path) {
        Ok(universe) => universe,
        Err(err) => {
            warn!(error = %err, "universe snapshot unavailable, using an empty universe");
            UniverseSnapshot::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> UniverseSnapshot {
        serde_json::from_str(
            r#"{
                "players": [
                    {"id": 1, "name": "vega", "alliance": 7},
                    {"id": 2, "name": "altair", "alliance": 7},
                    {"id": 3, "name": "deneb"}
                ],
                "planets": [
                    {"coordinates": {"galaxy": 1, "system": 5, "planet": 4}, "owner": 1,
                     "ships": [{"ship": 202, "count": 10}, {"ship": 999, "count": 1}]},
                    {"coordinates": {"galaxy": 1, "system": 5, "planet": 4}, "kind": 3, "owner": 1},
                    {"coordinates": {"galaxy": 1, "system": 9, "planet": 2}, "owner": 2}
                ],
                "buddies": [[1, 3]],
                "acs_groups": [{"id": 12, "fleets": 2}],
                "research": [{"player": 1, "astrophysics": 6}]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn owner_lookup_distinguishes_planet_and_moon() {
        let universe = fixture();
        let coords = Coordinates::new(1, 5, 4);
        let owner = universe.owner_at(coords, DestinationKind::Planet).unwrap();
        assert_eq!(owner.player, 1);
        assert_eq!(owner.alliance, Some(7));
        assert!(universe.owner_at(coords, DestinationKind::Moon).is_some());
        assert!(universe.owner_at(coords, DestinationKind::Debris).is_none());
        assert!(universe.owner_at(coords, DestinationKind::DeepSpace).is_none());
    }

    #[test]
    fn docked_ships_skip_unknown_ids() {
        let universe = fixture();
        let docked = universe.docked_ships(Coordinates::new(1, 5, 4), DestinationKind::Planet);
        assert_eq!(docked.count(ShipKind::SmallCargo), 10);
        assert_eq!(docked.total_ships(), 10);
    }

    #[test]
    fn collaborator_queries() {
        let universe = fixture();
        assert!(universe.are_buddies(3, 1));
        assert!(!universe.are_buddies(1, 2));
        assert_eq!(universe.grouped_fleets(12), 2);
        assert_eq!(universe.grouped_fleets(0), 0);
        assert_eq!(universe.astrophysics_level(1), 6);
        assert_eq!(universe.astrophysics_level(2), 0);
    }

    #[test]
    fn distance_by_coordinate_tier() {
        let universe = UniverseSnapshot::default();
        let home = Coordinates::new(1, 5, 4);
        assert_eq!(universe.distance(home, Coordinates::new(3, 5, 4)), 40_000);
        assert_eq!(universe.distance(home, Coordinates::new(1, 7, 4)), 2_890);
        assert_eq!(universe.distance(home, Coordinates::new(1, 5, 16)), 1_060);
        assert_eq!(universe.distance(home, home), 5);
    }

    #[test]
    fn missing_file_loads_empty_universe() {
        let universe = load_universe("data/does-not-exist.json");
        assert!(universe.planets.is_empty());
        assert!(matches!(
            read_universe("data/does-not-exist.json"),
            Err(UniverseError::Read { .. })
        ));
    }

    #[test]
    fn malformed_file_is_a_parse_error_and_loads_empty() {
        let path = std::env::temp_dir().join(format!("sortie-broken-universe-{}.json", std::process::id()));
        fs::write(&path, "{\"planets\": [").unwrap();
        let path = path.to_string_lossy().to_string();

        let err = read_universe(&path).unwrap_err();
        assert!(matches!(err, UniverseError::Parse { .. }));
        assert!(err.to_string().starts_with("unable to parse json"));
        assert!(load_universe(&path).planets.is_empty());

        let _ = fs::remove_file(&path);
    }
}
