use serde::Serialize;
use thiserror::Error;

use crate::data::config::SortieConfig;
use crate::data::universe::UniverseSnapshot;
use crate::dispatch::{
    plan_dispatch, resolve_request, rule_tables, DispatchError, DispatchRequest, MissionError,
    ResolveRequest,
};

/// Shared, read-only state for request handlers.
#[derive(Debug, Clone, Default)]
pub struct ServerState {
    pub config: SortieConfig,
    pub universe: UniverseSnapshot,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request body: {0}")]
    Parse(#[source] serde_json::Error),
    #[error(transparent)]
    Rejected(#[from] DispatchError),
    #[error("failed to serialize response: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "invalid_body",
            Self::Rejected(err) => err.code(),
            Self::Serialize(_) => "serialize_failed",
        }
    }
}

impl From<MissionError> for ApiError {
    fn from(err: MissionError) -> Self {
        Self::Rejected(err.into())
    }
}

fn to_json(value: &impl Serialize) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value).map_err(ApiError::Serialize)
}

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "sortie-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub fn rules_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&rule_tables())
}

/// POST /api/missions: facts are supplied in the body; nothing is looked up.
pub fn missions_payload(body: &str, state: &ServerState) -> Result<String, ApiError> {
    let request: ResolveRequest = serde_json::from_str(body).map_err(ApiError::Parse)?;
    let outcome = resolve_request(&request, &state.config.universe)?;
    to_json(&outcome)
}

/// POST /api/dispatch: full dispatch plan against the loaded universe snapshot.
pub fn dispatch_payload(body: &str, state: &ServerState) -> Result<String, ApiError> {
    let request: DispatchRequest = serde_json::from_str(body).map_err(ApiError::Parse)?;
    let plan = plan_dispatch(&request, &state.config.dispatch_settings(), &state.universe)?;
    to_json(&plan)
}
