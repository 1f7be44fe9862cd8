//! Duration options for expedition and hold (stay) missions.

use serde::Serialize;

use crate::dispatch::eligibility::AllowedMissionSet;
use crate::dispatch::rules::MissionKind;

/// Fixed hold durations, in hours.
pub const HOLDING_HOURS: [u32; 7] = [0, 1, 2, 4, 8, 16, 32];

/// Value preselected in either list. It is the literal value 1, not the first entry.
pub const DEFAULT_DURATION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationKind {
    ExpeditionTime,
    HoldingTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DurationOption {
    pub value: u32,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DurationOptions {
    /// `None` when neither expedition nor stay is allowed: no selector is shown.
    pub kind: Option<DurationKind>,
    pub options: Vec<DurationOption>,
}

impl DurationOptions {
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn selected(&self) -> Option<u32> {
        self.options.iter().find(|o| o.selected).map(|o| o.value)
    }
}

fn option(value: u32) -> DurationOption {
    DurationOption {
        value,
        selected: value == DEFAULT_DURATION,
    }
}

/// Expedition wins over stay; the two never co-occur for a single target anyway.
/// An astrophysics level of 0 gives an expedition selector with no options.
pub fn build_duration_options(allowed: &AllowedMissionSet, max_expedition_level: u32) -> DurationOptions {
    if allowed.contains(MissionKind::Expedition) {
        DurationOptions {
            kind: Some(DurationKind::ExpeditionTime),
            options: (1..=max_expedition_level).map(option).collect(),
        }
    } else if allowed.contains(MissionKind::Stay) {
        DurationOptions {
            kind: Some(DurationKind::HoldingTime),
            options: HOLDING_HOURS.into_iter().map(option).collect(),
        }
    } else {
        DurationOptions::default()
    }
}
