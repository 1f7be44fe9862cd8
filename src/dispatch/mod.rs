//! Fleet dispatch: which missions a fleet may fly to a target, and for how long.

pub mod context;
pub mod duration;
pub mod eligibility;
pub mod error;
pub mod fleet;
pub mod plan;
pub mod request;
pub mod rules;

pub use context::{
    gather_facts, is_friendly, locate_target, resolve_context, AcsRegistry, ActingPlayer,
    AllianceId, Coordinates, DestinationContext, Diplomacy, EligibilityFacts, FlightComputer,
    PlanetDirectory, PlanetOwner, PlayerId, ResearchLedger, TargetDescriptor, UniverseLimits,
};
pub use duration::{
    build_duration_options, DurationKind, DurationOption, DurationOptions, DEFAULT_DURATION,
    HOLDING_HOURS,
};
pub use eligibility::{
    apply_exclusions, permissible_missions, resolve_allowed_missions, AllowedMissionSet, Exclusion,
};
pub use error::{DispatchError, MissionError};
pub use fleet::{FleetComposition, FleetLine, ShipEntry};
pub use plan::{
    mission_choices, plan_dispatch, validate_request, DispatchPlan, DispatchRequest,
    DispatchSettings, GameWorld, MissionChoice,
};
pub use request::{resolve_request, ResolveOutcome, ResolveRequest};
pub use rules::{
    destination_missions, rule_tables, ship_missions, DestinationKind, MissionKind,
    OwnershipContext, RuleTables, ShipKind,
};
