//! Context resolution: ownership, occupancy, friendliness and the deep-space slot.
//!
//! The collaborator traits here are what the surrounding application implements
//! (database, diplomacy, ACS bookkeeping, research, flight physics). They are only
//! queried while gathering facts, never by the eligibility engine itself.

use serde::{Deserialize, Serialize};

use crate::dispatch::fleet::FleetComposition;
use crate::dispatch::rules::{DestinationKind, OwnershipContext};

pub type PlayerId = u64;
pub type AllianceId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinates {
    pub galaxy: u32,
    pub system: u32,
    pub planet: u32,
}

impl Coordinates {
    pub fn new(galaxy: u32, system: u32, planet: u32) -> Self {
        Self {
            galaxy,
            system,
            planet,
        }
    }
}

/// Size of the universe. `planets` is the number of normal slots per system;
/// slot `planets + 1` is the reserved deep-space (expedition) slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniverseLimits {
    pub galaxies: u32,
    pub systems: u32,
    pub planets: u32,
}

impl Default for UniverseLimits {
    fn default() -> Self {
        Self {
            galaxies: 9,
            systems: 499,
            planets: 15,
        }
    }
}

impl UniverseLimits {
    /// Saturates at `u32::MAX`; configs that large are rejected at load time.
    pub fn expedition_slot(&self) -> u32 {
        self.planets.saturating_add(1)
    }
}

/// Owner of an occupied target. `alliance` is `None` for players outside any alliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanetOwner {
    pub player: PlayerId,
    #[serde(default)]
    pub alliance: Option<AllianceId>,
}

/// The player ordering the dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActingPlayer {
    pub id: PlayerId,
    #[serde(default)]
    pub alliance: Option<AllianceId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDescriptor {
    pub coordinates: Coordinates,
    pub kind: DestinationKind,
    #[serde(default)]
    pub owner: Option<PlanetOwner>,
    /// Normal slot count of the target's system.
    pub system_slots: u32,
}

impl TargetDescriptor {
    pub fn is_deep_space(&self) -> bool {
        self.kind == DestinationKind::DeepSpace
            || self.system_slots.checked_add(1) == Some(self.coordinates.planet)
    }
}

/// Boolean facts the eligibility engine consumes. Gathered before resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityFacts {
    pub acs_available: bool,
    pub target_is_friendly: bool,
    pub target_is_occupied: bool,
}

/// Resolved view of the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DestinationContext {
    pub kind: DestinationKind,
    pub ownership: OwnershipContext,
    pub occupied: bool,
}

/// Ownership and occupancy for `target` as seen by `acting`. The deep-space slot
/// overrides whatever kind the descriptor carries.
pub fn resolve_context(target: &TargetDescriptor, acting: PlayerId) -> DestinationContext {
    let ownership = match target.owner {
        Some(owner) if owner.player == acting => OwnershipContext::Own,
        _ => OwnershipContext::Other,
    };
    let kind = if target.is_deep_space() {
        DestinationKind::DeepSpace
    } else {
        target.kind
    };
    DestinationContext {
        kind,
        ownership,
        occupied: target.owner.is_some(),
    }
}

pub trait PlanetDirectory {
    /// Owner of whatever sits at `coords` with the given kind, if anything.
    fn owner_at(&self, coords: Coordinates, kind: DestinationKind) -> Option<PlanetOwner>;

    /// Ships currently docked at the given location.
    fn docked_ships(&self, coords: Coordinates, kind: DestinationKind) -> FleetComposition;
}

pub trait Diplomacy {
    fn are_buddies(&self, a: PlayerId, b: PlayerId) -> bool;
}

pub trait AcsRegistry {
    /// Number of fleets already grouped under `group`.
    fn grouped_fleets(&self, group: u64) -> u32;
}

pub trait ResearchLedger {
    fn astrophysics_level(&self, player: PlayerId) -> u32;
}

pub trait FlightComputer {
    fn distance(&self, origin: Coordinates, target: Coordinates) -> u64;
}

/// Buddies are always friendly; otherwise both players must share an alliance.
/// Alliance id 0 means "no alliance" and never matches.
pub fn is_friendly(acting: &ActingPlayer, owner: &PlanetOwner, diplomacy: &impl Diplomacy) -> bool {
    if diplomacy.are_buddies(acting.id, owner.player) {
        return true;
    }
    matches!((acting.alliance, owner.alliance), (Some(mine), Some(theirs)) if mine != 0 && mine == theirs)
}

/// Look up the target in the directory and build its descriptor.
pub fn locate_target(
    directory: &impl PlanetDirectory,
    coordinates: Coordinates,
    kind: DestinationKind,
    limits: &UniverseLimits,
) -> TargetDescriptor {
    TargetDescriptor {
        coordinates,
        kind,
        owner: directory.owner_at(coordinates, kind),
        system_slots: limits.planets,
    }
}

/// Query collaborators once and freeze the answers into [EligibilityFacts].
pub fn gather_facts(
    target: &TargetDescriptor,
    acting: &ActingPlayer,
    acs_group: u64,
    diplomacy: &impl Diplomacy,
    acs: &impl AcsRegistry,
) -> EligibilityFacts {
    EligibilityFacts {
        acs_available: acs.grouped_fleets(acs_group) > 0,
        target_is_friendly: target
            .owner
            .map_or(false, |owner| is_friendly(acting, &owner, diplomacy)),
        target_is_occupied: target.owner.is_some(),
    }
}
