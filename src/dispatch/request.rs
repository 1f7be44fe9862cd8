//! Raw resolve request: facts supplied up front by the caller, no collaborators.
//! Used by `sortie resolve`, `sortie batch` and `POST /api/missions`.

use serde::{Deserialize, Serialize};

use crate::dispatch::context::{
    Coordinates, EligibilityFacts, PlanetOwner, PlayerId, TargetDescriptor, UniverseLimits,
};
use crate::dispatch::duration::{build_duration_options, DurationOptions};
use crate::dispatch::eligibility::{resolve_allowed_missions, AllowedMissionSet};
use crate::dispatch::error::MissionError;
use crate::dispatch::fleet::{FleetComposition, ShipEntry};
use crate::dispatch::rules::DestinationKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveRequest {
    pub player: PlayerId,
    pub fleet: Vec<ShipEntry>,
    pub target: Coordinates,
    /// 1 = planet, 2 = debris field, 3 = moon.
    #[serde(default = "default_target_type")]
    pub target_type: u8,
    #[serde(default)]
    pub owner: Option<PlanetOwner>,
    #[serde(default)]
    pub facts: EligibilityFacts,
    #[serde(default)]
    pub astrophysics_level: u32,
}

fn default_target_type() -> u8 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolveOutcome {
    pub missions: AllowedMissionSet,
    pub durations: DurationOptions,
}

impl ResolveRequest {
    pub fn target_descriptor(&self, limits: &UniverseLimits) -> Result<TargetDescriptor, MissionError> {
        let kind = DestinationKind::from_id(self.target_type)
            .ok_or(MissionError::UnknownDestinationKind(self.target_type))?;
        Ok(TargetDescriptor {
            coordinates: self.target,
            kind,
            owner: self.owner,
            system_slots: limits.planets,
        })
    }
}

pub fn resolve_request(request: &ResolveRequest, limits: &UniverseLimits) -> Result<ResolveOutcome, MissionError> {
    let fleet = FleetComposition::from_entries(&request.fleet)?;
    let target = request.target_descriptor(limits)?;
    let missions = resolve_allowed_missions(&fleet, &target, request.player, &request.facts)?;
    let durations = build_duration_options(&missions, request.astrophysics_level);
    Ok(ResolveOutcome {
        missions,
        durations,
    })
}
