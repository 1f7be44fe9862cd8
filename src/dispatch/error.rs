use thiserror::Error;

/// Terminal resolution failures. None of these are retryable: they describe an
/// invalid fleet/target combination or bad input ids.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MissionError {
    #[error("fleet has no ships with a positive count")]
    EmptyFleetComposition,
    #[error("no mission is eligible for this fleet and destination")]
    NoEligibleMission,
    #[error("unknown ship kind id {0}")]
    UnknownShipKind(u16),
    #[error("unknown destination kind id {0}")]
    UnknownDestinationKind(u8),
}

impl MissionError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyFleetComposition => "empty_fleet_composition",
            Self::NoEligibleMission => "no_eligible_mission",
            Self::UnknownShipKind(_) => "unknown_ship_kind",
            Self::UnknownDestinationKind(_) => "unknown_destination_kind",
        }
    }
}

/// Failures of the full dispatch flow: input validation plus anything the resolver reports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("{field} {value} is outside 1..={max}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        max: u32,
    },
    #[error("target is the origin planet")]
    TargetIsOrigin,
    #[error(transparent)]
    Mission(#[from] MissionError),
}

impl DispatchError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => "out_of_range",
            Self::TargetIsOrigin => "target_is_origin",
            Self::Mission(err) => err.code(),
        }
    }

    /// Validation failures are the caller's input; mission failures are rule outcomes.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::OutOfRange { .. }
                | Self::TargetIsOrigin
                | Self::Mission(MissionError::UnknownShipKind(_))
                | Self::Mission(MissionError::UnknownDestinationKind(_))
        )
    }
}
