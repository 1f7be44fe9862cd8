//! Eligibility engine: combines ship rules, destination rules and contextual
//! exclusions into the final mission set for one fleet/target pair.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::dispatch::context::{resolve_context, EligibilityFacts, PlayerId, TargetDescriptor};
use crate::dispatch::error::MissionError;
use crate::dispatch::fleet::FleetComposition;
use crate::dispatch::rules::{destination_missions, ship_missions, DestinationKind, MissionKind};

/// Non-empty, strictly ascending, duplicate-free set of missions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AllowedMissionSet(Vec<MissionKind>);

impl AllowedMissionSet {
    pub fn as_slice(&self) -> &[MissionKind] {
        &self.0
    }

    pub fn contains(&self, mission: MissionKind) -> bool {
        self.0.contains(&mission)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = MissionKind> + '_ {
        self.0.iter().copied()
    }

    pub fn into_vec(self) -> Vec<MissionKind> {
        self.0
    }
}

/// Contextual exclusions, applied in declaration order. Each one removes a single
/// mission when its precondition fails; removing an absent mission is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    /// ACS needs an existing allied-attack group.
    AcsUnavailable,
    /// Holding at an occupied target needs a friendly owner.
    HostileStay,
    /// Occupied slots cannot be colonized.
    OccupiedColonize,
}

impl Exclusion {
    pub const PIPELINE: [Exclusion; 3] = [
        Self::AcsUnavailable,
        Self::HostileStay,
        Self::OccupiedColonize,
    ];

    pub fn mission(self) -> MissionKind {
        match self {
            Self::AcsUnavailable => MissionKind::Acs,
            Self::HostileStay => MissionKind::Stay,
            Self::OccupiedColonize => MissionKind::Colonize,
        }
    }

    pub fn applies(self, facts: &EligibilityFacts) -> bool {
        match self {
            Self::AcsUnavailable => !facts.acs_available,
            Self::HostileStay => facts.target_is_occupied && !facts.target_is_friendly,
            Self::OccupiedColonize => facts.target_is_occupied,
        }
    }
}

pub fn apply_exclusions(base: &[MissionKind], facts: &EligibilityFacts) -> Vec<MissionKind> {
    let mut missions = base.to_vec();
    for exclusion in Exclusion::PIPELINE {
        if exclusion.applies(facts) {
            missions.retain(|mission| *mission != exclusion.mission());
        }
    }
    missions
}

/// Missions the destination permits for this acting player, after exclusions.
/// The deep-space slot yields `[Expedition]` and skips exclusions entirely.
///
/// A target with an owner is occupied whatever `facts` says; the flag can only
/// add occupancy, never clear it.
pub fn permissible_missions(
    target: &TargetDescriptor,
    acting_player: PlayerId,
    facts: &EligibilityFacts,
) -> Vec<MissionKind> {
    let context = resolve_context(target, acting_player);
    let base = destination_missions(context.kind, context.ownership);
    if context.kind == DestinationKind::DeepSpace {
        return base.to_vec();
    }
    let facts = EligibilityFacts {
        target_is_occupied: facts.target_is_occupied || context.occupied,
        ..*facts
    };
    apply_exclusions(base, &facts)
}

/// Resolve the legal mission set for `fleet` flying to `target`.
///
/// Fails with [MissionError::EmptyFleetComposition] when no ship has a positive
/// count, and with [MissionError::NoEligibleMission] when every ship's rules miss
/// the destination's permissible set.
pub fn resolve_allowed_missions(
    fleet: &FleetComposition,
    target: &TargetDescriptor,
    acting_player: PlayerId,
    facts: &EligibilityFacts,
) -> Result<AllowedMissionSet, MissionError> {
    if fleet.is_empty() {
        return Err(MissionError::EmptyFleetComposition);
    }

    let permissible = permissible_missions(target, acting_player, facts);
    let missions: BTreeSet<MissionKind> = fleet
        .active()
        .flat_map(|(ship, _)| ship_missions(ship).iter().copied())
        .filter(|mission| permissible.contains(mission))
        .collect();

    if missions.is_empty() {
        return Err(MissionError::NoEligibleMission);
    }
    Ok(AllowedMissionSet(missions.into_iter().collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::context::{Coordinates, PlanetOwner};
    use crate::dispatch::rules::ShipKind;

    fn facts(acs_available: bool, target_is_friendly: bool, target_is_occupied: bool) -> EligibilityFacts {
        EligibilityFacts {
            acs_available,
            target_is_friendly,
            target_is_occupied,
        }
    }

    fn planet(owner: Option<u64>) -> TargetDescriptor {
        TargetDescriptor {
            coordinates: Coordinates::new(2, 41, 8),
            kind: DestinationKind::Planet,
            owner: owner.map(|player| PlanetOwner {
                player,
                alliance: None,
            }),
            system_slots: 15,
        }
    }

    #[test]
    fn exclusion_pipeline_removes_only_failing_preconditions() {
        let base = destination_missions(DestinationKind::Planet, crate::dispatch::rules::OwnershipContext::Other);

        let all_pass = apply_exclusions(base, &facts(true, true, false));
        assert_eq!(all_pass, base.to_vec());

        let hostile = apply_exclusions(base, &facts(false, false, true));
        assert_eq!(
            hostile,
            vec![MissionKind::Attack, MissionKind::Transport, MissionKind::Spy]
        );
    }

    #[test]
    fn removing_absent_mission_is_a_no_op() {
        let base = [MissionKind::Transport, MissionKind::Deploy];
        assert_eq!(apply_exclusions(&base, &facts(false, false, true)), base.to_vec());
    }

    #[test]
    fn friendly_occupied_target_keeps_stay() {
        let missions = apply_exclusions(
            &[MissionKind::Transport, MissionKind::Stay],
            &facts(false, true, true),
        );
        assert_eq!(missions, vec![MissionKind::Transport, MissionKind::Stay]);
    }

    #[test]
    fn unoccupied_target_keeps_stay_even_without_friendship() {
        let missions = apply_exclusions(&[MissionKind::Stay], &facts(false, false, false));
        assert_eq!(missions, vec![MissionKind::Stay]);
    }

    #[test]
    fn mixed_fleet_unions_per_ship_results() {
        let fleet = FleetComposition::new()
            .with(ShipKind::ColonyShip, 1)
            .with(ShipKind::EspionageProbe, 3);
        let allowed = resolve_allowed_missions(&fleet, &planet(None), 1, &facts(true, false, false)).unwrap();
        assert_eq!(
            allowed.as_slice(),
            &[
                MissionKind::Attack,
                MissionKind::Acs,
                MissionKind::Stay,
                MissionKind::Spy,
                MissionKind::Colonize,
            ]
        );
    }

    #[test]
    fn zero_count_ships_do_not_contribute() {
        let fleet = FleetComposition::new()
            .with(ShipKind::Recycler, 0)
            .with(ShipKind::SmallCargo, 1);
        let mut debris = planet(None);
        debris.kind = DestinationKind::Debris;
        assert_eq!(
            resolve_allowed_missions(&fleet, &debris, 1, &EligibilityFacts::default()),
            Err(MissionError::NoEligibleMission)
        );
    }

    #[test]
    fn empty_fleet_fails_before_evaluation() {
        let fleet = FleetComposition::new().with(ShipKind::Battleship, 0);
        assert_eq!(
            resolve_allowed_missions(&fleet, &planet(None), 1, &EligibilityFacts::default()),
            Err(MissionError::EmptyFleetComposition)
        );
    }

    #[test]
    fn deep_space_ignores_exclusions_and_ownership() {
        let mut target = planet(Some(9));
        target.coordinates.planet = 16;
        let fleet = FleetComposition::new().with(ShipKind::Deathstar, 1);
        let allowed = resolve_allowed_missions(&fleet, &target, 1, &facts(false, false, true)).unwrap();
        assert_eq!(allowed.as_slice(), &[MissionKind::Expedition]);
    }

    #[test]
    fn owned_target_counts_as_occupied_without_the_flag() {
        let fleet = FleetComposition::new()
            .with(ShipKind::ColonyShip, 1)
            .with(ShipKind::Battleship, 1);
        let allowed = resolve_allowed_missions(&fleet, &planet(Some(2)), 1, &EligibilityFacts::default()).unwrap();
        assert_eq!(allowed.as_slice(), &[MissionKind::Attack, MissionKind::Transport]);

        let allowed = resolve_allowed_missions(&fleet, &planet(Some(2)), 1, &facts(false, true, false)).unwrap();
        assert_eq!(
            allowed.as_slice(),
            &[MissionKind::Attack, MissionKind::Transport, MissionKind::Stay]
        );
    }

    #[test]
    fn deathstar_can_destroy_foreign_moon() {
        let mut moon = planet(Some(2));
        moon.kind = DestinationKind::Moon;
        let fleet = FleetComposition::new().with(ShipKind::Deathstar, 1);
        let allowed = resolve_allowed_missions(&fleet, &moon, 1, &facts(false, false, true)).unwrap();
        assert_eq!(
            allowed.as_slice(),
            &[MissionKind::Attack, MissionKind::Transport, MissionKind::DestroyMoon]
        );
    }
}
