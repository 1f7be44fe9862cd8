//! Static mission rule tables: which missions a ship class can ever fly, and which
//! missions a destination allows under a given ownership relation.
//!
//! Both tables are total `match` expressions over closed enums, so a missing entry
//! is a compile error rather than a runtime case.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ship classes that can be part of a dispatched fleet. Discriminants are the game's object ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u16)]
pub enum ShipKind {
    SmallCargo = 202,
    LargeCargo = 203,
    LightFighter = 204,
    HeavyFighter = 205,
    Cruiser = 206,
    Battleship = 207,
    ColonyShip = 208,
    Recycler = 209,
    EspionageProbe = 210,
    Bomber = 211,
    SolarSatellite = 212,
    Destroyer = 213,
    Deathstar = 214,
    Battlecruiser = 215,
}

impl ShipKind {
    pub const ALL: [ShipKind; 14] = [
        Self::SmallCargo,
        Self::LargeCargo,
        Self::LightFighter,
        Self::HeavyFighter,
        Self::Cruiser,
        Self::Battleship,
        Self::ColonyShip,
        Self::Recycler,
        Self::EspionageProbe,
        Self::Bomber,
        Self::SolarSatellite,
        Self::Destroyer,
        Self::Deathstar,
        Self::Battlecruiser,
    ];

    pub fn id(self) -> u16 {
        self as u16
    }

    pub fn from_id(id: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SmallCargo => "small_cargo",
            Self::LargeCargo => "large_cargo",
            Self::LightFighter => "light_fighter",
            Self::HeavyFighter => "heavy_fighter",
            Self::Cruiser => "cruiser",
            Self::Battleship => "battleship",
            Self::ColonyShip => "colony_ship",
            Self::Recycler => "recycler",
            Self::EspionageProbe => "espionage_probe",
            Self::Bomber => "bomber",
            Self::SolarSatellite => "solar_satellite",
            Self::Destroyer => "destroyer",
            Self::Deathstar => "deathstar",
            Self::Battlecruiser => "battlecruiser",
        }
    }
}

impl fmt::Display for ShipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mission types. The derived ordering follows the numeric rank, which is also display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum MissionKind {
    Attack = 1,
    Acs = 2,
    Transport = 3,
    Deploy = 4,
    Stay = 5,
    Spy = 6,
    Colonize = 7,
    Recycle = 8,
    DestroyMoon = 9,
    Expedition = 15,
}

impl MissionKind {
    pub const ALL: [MissionKind; 10] = [
        Self::Attack,
        Self::Acs,
        Self::Transport,
        Self::Deploy,
        Self::Stay,
        Self::Spy,
        Self::Colonize,
        Self::Recycle,
        Self::DestroyMoon,
        Self::Expedition,
    ];

    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn from_rank(rank: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.rank() == rank)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Attack => "attack",
            Self::Acs => "acs",
            Self::Transport => "transport",
            Self::Deploy => "deploy",
            Self::Stay => "stay",
            Self::Spy => "spy",
            Self::Colonize => "colonize",
            Self::Recycle => "recycle",
            Self::DestroyMoon => "destroy_moon",
            Self::Expedition => "expedition",
        }
    }
}

impl fmt::Display for MissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What sits at the target coordinates. `DeepSpace` has no wire id: it is only ever
/// produced by the context resolver for the slot past the last planet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationKind {
    Planet,
    Debris,
    Moon,
    DeepSpace,
}

impl DestinationKind {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::Planet),
            2 => Some(Self::Debris),
            3 => Some(Self::Moon),
            _ => None,
        }
    }

    pub fn id(self) -> Option<u8> {
        match self {
            Self::Planet => Some(1),
            Self::Debris => Some(2),
            Self::Moon => Some(3),
            Self::DeepSpace => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planet => "planet",
            Self::Debris => "debris",
            Self::Moon => "moon",
            Self::DeepSpace => "deep_space",
        }
    }
}

impl fmt::Display for DestinationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the acting player owns the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipContext {
    Own,
    Other,
}

use MissionKind::*;

const COMBAT_HULL: &[MissionKind] = &[Attack, Acs, Transport, Deploy, Stay, Expedition];
const COLONY_SHIP: &[MissionKind] = &[Deploy, Colonize, Expedition];
const RECYCLER: &[MissionKind] = &[Deploy, Recycle, Expedition];
const ESPIONAGE_PROBE: &[MissionKind] = &[Attack, Acs, Deploy, Stay, Spy, Expedition];
const DEATHSTAR: &[MissionKind] = &[Attack, Acs, Transport, Deploy, Stay, DestroyMoon, Expedition];

const OWN_ORBIT: &[MissionKind] = &[Transport, Deploy];
const FOREIGN_PLANET: &[MissionKind] = &[Attack, Acs, Transport, Stay, Spy, Colonize];
const FOREIGN_MOON: &[MissionKind] = &[Attack, Acs, Transport, Stay, Spy, DestroyMoon];
const DEBRIS_FIELD: &[MissionKind] = &[Recycle];
const DEEP_SPACE: &[MissionKind] = &[Expedition];

/// Every mission this ship class can take part in, regardless of target.
pub fn ship_missions(ship: ShipKind) -> &'static [MissionKind] {
    match ship {
        ShipKind::SmallCargo
        | ShipKind::LargeCargo
        | ShipKind::LightFighter
        | ShipKind::HeavyFighter
        | ShipKind::Cruiser
        | ShipKind::Battleship
        | ShipKind::Bomber
        | ShipKind::Destroyer
        | ShipKind::Battlecruiser => COMBAT_HULL,
        ShipKind::ColonyShip => COLONY_SHIP,
        ShipKind::Recycler => RECYCLER,
        ShipKind::EspionageProbe => ESPIONAGE_PROBE,
        ShipKind::SolarSatellite => &[],
        ShipKind::Deathstar => DEATHSTAR,
    }
}

/// Missions a destination permits before contextual exclusions.
pub fn destination_missions(kind: DestinationKind, ownership: OwnershipContext) -> &'static [MissionKind] {
    match (kind, ownership) {
        (DestinationKind::Planet, OwnershipContext::Own) => OWN_ORBIT,
        (DestinationKind::Planet, OwnershipContext::Other) => FOREIGN_PLANET,
        (DestinationKind::Moon, OwnershipContext::Own) => OWN_ORBIT,
        (DestinationKind::Moon, OwnershipContext::Other) => FOREIGN_MOON,
        (DestinationKind::Debris, _) => DEBRIS_FIELD,
        (DestinationKind::DeepSpace, _) => DEEP_SPACE,
    }
}

/// Serializable dump of both tables, used by `sortie rules` and `GET /api/rules`.
#[derive(Debug, Clone, Serialize)]
pub struct RuleTables {
    pub ships: Vec<ShipRuleRow>,
    pub destinations: Vec<DestinationRuleRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShipRuleRow {
    pub id: u16,
    pub ship: ShipKind,
    pub missions: Vec<MissionKind>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DestinationRuleRow {
    pub destination: DestinationKind,
    pub own: Vec<MissionKind>,
    pub other: Vec<MissionKind>,
}

pub fn rule_tables() -> RuleTables {
    let ships = ShipKind::ALL
        .into_iter()
        .map(|ship| ShipRuleRow {
            id: ship.id(),
            ship,
            missions: ship_missions(ship).to_vec(),
        })
        .collect();
    let destinations = [
        DestinationKind::Planet,
        DestinationKind::Debris,
        DestinationKind::Moon,
        DestinationKind::DeepSpace,
    ]
    .into_iter()
    .map(|destination| DestinationRuleRow {
        destination,
        own: destination_missions(destination, OwnershipContext::Own).to_vec(),
        other: destination_missions(destination, OwnershipContext::Other).to_vec(),
    })
    .collect();
    RuleTables { ships, destinations }
}
