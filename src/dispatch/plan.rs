//! Full dispatch flow: validate raw input, gather facts from collaborators, resolve
//! missions and durations, and attach the flight distance.

use serde::{Deserialize, Serialize};

use crate::dispatch::context::{
    gather_facts, locate_target, resolve_context, AcsRegistry, ActingPlayer, Coordinates,
    DestinationContext, Diplomacy, EligibilityFacts, FlightComputer, PlanetDirectory,
    ResearchLedger, UniverseLimits,
};
use crate::dispatch::duration::{build_duration_options, DurationOptions};
use crate::dispatch::eligibility::{resolve_allowed_missions, AllowedMissionSet};
use crate::dispatch::error::{DispatchError, MissionError};
use crate::dispatch::fleet::{FleetComposition, FleetLine, ShipEntry};
use crate::dispatch::rules::{DestinationKind, MissionKind};

/// Everything the dispatch flow queries. Blanket-implemented for any type that
/// provides all collaborator traits.
pub trait GameWorld: PlanetDirectory + Diplomacy + AcsRegistry + ResearchLedger + FlightComputer {}

impl<T> GameWorld for T where T: PlanetDirectory + Diplomacy + AcsRegistry + ResearchLedger + FlightComputer {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchSettings {
    pub limits: UniverseLimits,
    /// Highest speed step (10 = 100%).
    pub max_speed_step: u32,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            limits: UniverseLimits::default(),
            max_speed_step: 10,
        }
    }
}

/// Raw dispatch request as submitted by a client. Kinds and ship ids are numeric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchRequest {
    pub player: ActingPlayer,
    pub origin: Coordinates,
    #[serde(default = "default_kind_id")]
    pub origin_type: u8,
    pub target: Coordinates,
    #[serde(default = "default_kind_id")]
    pub target_type: u8,
    pub speed: u32,
    pub fleet: Vec<ShipEntry>,
    #[serde(default)]
    pub fleet_group: u64,
    #[serde(default)]
    pub current_mission: Option<u8>,
}

fn default_kind_id() -> u8 {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MissionChoice {
    pub mission: MissionKind,
    pub rank: u8,
    pub checked: bool,
    pub expedition_warning: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchPlan {
    pub origin: Coordinates,
    pub target: Coordinates,
    pub destination: DestinationContext,
    pub speed: u32,
    pub fleet: Vec<FleetLine>,
    pub facts: EligibilityFacts,
    pub missions: Vec<MissionChoice>,
    pub durations: DurationOptions,
    pub distance: u64,
}

fn check_range(field: &'static str, value: u32, max: u32) -> Result<(), DispatchError> {
    if (1..=max).contains(&value) {
        Ok(())
    } else {
        Err(DispatchError::OutOfRange { field, value, max })
    }
}

/// Range checks on the raw request. The target slot may be the expedition slot; the
/// origin may not.
pub fn validate_request(request: &DispatchRequest, settings: &DispatchSettings) -> Result<(), DispatchError> {
    let limits = &settings.limits;
    check_range("galaxy", request.target.galaxy, limits.galaxies)?;
    check_range("system", request.target.system, limits.systems)?;
    check_range("planet", request.target.planet, limits.expedition_slot())?;
    check_range("planet type", u32::from(request.target_type), 3)?;
    check_range("speed", request.speed, settings.max_speed_step)?;

    check_range("origin galaxy", request.origin.galaxy, limits.galaxies)?;
    check_range("origin system", request.origin.system, limits.systems)?;
    check_range("origin planet", request.origin.planet, limits.planets)?;
    check_range("origin type", u32::from(request.origin_type), 3)?;

    if request.origin == request.target && request.origin_type == request.target_type {
        return Err(DispatchError::TargetIsOrigin);
    }
    Ok(())
}

pub fn mission_choices(allowed: &AllowedMissionSet, current: Option<u8>) -> Vec<MissionChoice> {
    allowed
        .iter()
        .map(|mission| MissionChoice {
            mission,
            rank: mission.rank(),
            checked: current == Some(mission.rank()),
            expedition_warning: mission == MissionKind::Expedition,
        })
        .collect()
}

/// Plan a dispatch against `world`. Requested ship counts are clamped to what is
/// docked at the origin.
pub fn plan_dispatch(
    request: &DispatchRequest,
    settings: &DispatchSettings,
    world: &impl GameWorld,
) -> Result<DispatchPlan, DispatchError> {
    validate_request(request, settings)?;

    let target_kind = DestinationKind::from_id(request.target_type)
        .ok_or(MissionError::UnknownDestinationKind(request.target_type))?;
    let origin_kind = DestinationKind::from_id(request.origin_type)
        .ok_or(MissionError::UnknownDestinationKind(request.origin_type))?;

    let requested = FleetComposition::from_entries(&request.fleet)?;
    let fleet = requested.clamp_to(&world.docked_ships(request.origin, origin_kind));
    if fleet.is_empty() {
        return Err(MissionError::EmptyFleetComposition.into());
    }

    let target = locate_target(world, request.target, target_kind, &settings.limits);
    let facts = gather_facts(&target, &request.player, request.fleet_group, world, world);
    let allowed = resolve_allowed_missions(&fleet, &target, request.player.id, &facts)?;
    let durations = build_duration_options(&allowed, world.astrophysics_level(request.player.id));

    Ok(DispatchPlan {
        origin: request.origin,
        target: request.target,
        destination: resolve_context(&target, request.player.id),
        speed: request.speed,
        fleet: fleet.lines(),
        facts,
        missions: mission_choices(&allowed, request.current_mission),
        durations,
        distance: world.distance(request.origin, request.target),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::context::{PlanetOwner, PlayerId};
    use crate::dispatch::duration::DurationKind;
    use crate::dispatch::rules::{OwnershipContext, ShipKind};

    #[derive(Default)]
    struct World {
        owner: Option<PlanetOwner>,
        docked: FleetComposition,
        acs_fleets: u32,
        astrophysics: u32,
    }

    impl PlanetDirectory for World {
        fn owner_at(&self, _coords: Coordinates, _kind: DestinationKind) -> Option<PlanetOwner> {
            self.owner
        }

        fn docked_ships(&self, _coords: Coordinates, _kind: DestinationKind) -> FleetComposition {
            self.docked.clone()
        }
    }

    impl Diplomacy for World {
        fn are_buddies(&self, _a: PlayerId, _b: PlayerId) -> bool {
            false
        }
    }

    impl AcsRegistry for World {
        fn grouped_fleets(&self, _group: u64) -> u32 {
            self.acs_fleets
        }
    }

    impl ResearchLedger for World {
        fn astrophysics_level(&self, _player: PlayerId) -> u32 {
            self.astrophysics
        }
    }

    impl FlightComputer for World {
        fn distance(&self, _origin: Coordinates, _target: Coordinates) -> u64 {
            1005
        }
    }

    fn request(target_planet: u32, fleet: Vec<ShipEntry>) -> DispatchRequest {
        DispatchRequest {
            player: ActingPlayer {
                id: 1,
                alliance: None,
            },
            origin: Coordinates::new(1, 10, 4),
            origin_type: 1,
            target: Coordinates::new(1, 10, target_planet),
            target_type: 1,
            speed: 10,
            fleet,
            fleet_group: 0,
            current_mission: Some(7),
        }
    }

    #[test]
    fn plan_clamps_fleet_and_marks_current_mission() {
        let world = World {
            docked: FleetComposition::new().with(ShipKind::ColonyShip, 1),
            ..World::default()
        };
        let plan = plan_dispatch(
            &request(9, vec![ShipEntry { ship: 208, count: 4 }]),
            &DispatchSettings::default(),
            &world,
        )
        .unwrap();

        assert_eq!(plan.fleet.len(), 1);
        assert_eq!(plan.fleet[0].count, 1);
        assert_eq!(plan.missions.len(), 1);
        assert_eq!(plan.missions[0].mission, MissionKind::Colonize);
        assert!(plan.missions[0].checked);
        assert_eq!(plan.destination.ownership, OwnershipContext::Other);
        assert_eq!(plan.distance, 1005);
        assert_eq!(plan.durations.kind, None);
    }

    #[test]
    fn expedition_plan_uses_astrophysics_and_flags_warning() {
        let world = World {
            docked: FleetComposition::new().with(ShipKind::LargeCargo, 10),
            astrophysics: 4,
            ..World::default()
        };
        let plan = plan_dispatch(
            &request(16, vec![ShipEntry { ship: 203, count: 2 }]),
            &DispatchSettings::default(),
            &world,
        )
        .unwrap();

        assert_eq!(plan.destination.kind, DestinationKind::DeepSpace);
        assert_eq!(plan.missions.len(), 1);
        assert!(plan.missions[0].expedition_warning);
        assert!(!plan.missions[0].checked);
        assert_eq!(plan.durations.kind, Some(DurationKind::ExpeditionTime));
        assert_eq!(plan.durations.options.len(), 4);
    }

    #[test]
    fn ships_not_docked_leave_an_empty_fleet() {
        let world = World::default();
        let err = plan_dispatch(
            &request(9, vec![ShipEntry { ship: 207, count: 5 }]),
            &DispatchSettings::default(),
            &world,
        )
        .unwrap_err();
        assert_eq!(err, DispatchError::Mission(MissionError::EmptyFleetComposition));
    }

    #[test]
    fn rejects_out_of_range_and_origin_targets() {
        let settings = DispatchSettings::default();
        let world = World::default();

        let err = plan_dispatch(&request(17, Vec::new()), &settings, &world).unwrap_err();
        assert_eq!(
            err,
            DispatchError::OutOfRange {
                field: "planet",
                value: 17,
                max: 16,
            }
        );

        let mut slow = request(9, Vec::new());
        slow.speed = 0;
        assert!(matches!(
            plan_dispatch(&slow, &settings, &world),
            Err(DispatchError::OutOfRange { field: "speed", .. })
        ));

        let err = plan_dispatch(&request(4, Vec::new()), &settings, &world).unwrap_err();
        assert_eq!(err, DispatchError::TargetIsOrigin);
        assert!(err.is_validation());
    }

    #[test]
    fn own_moon_target_is_not_the_origin_planet() {
        let world = World {
            owner: Some(PlanetOwner {
                player: 1,
                alliance: None,
            }),
            docked: FleetComposition::new().with(ShipKind::SmallCargo, 3),
            ..World::default()
        };
        let mut req = request(4, vec![ShipEntry { ship: 202, count: 3 }]);
        req.target_type = 3;
        let plan = plan_dispatch(&req, &DispatchSettings::default(), &world).unwrap();
        let missions: Vec<_> = plan.missions.iter().map(|c| c.mission).collect();
        assert_eq!(missions, vec![MissionKind::Transport, MissionKind::Deploy]);
    }
}
