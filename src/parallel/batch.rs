//! Batch resolution: many independent resolve requests fanned out over Rayon.
//!
//! The resolver holds no state, so requests need no coordination; results keep
//! the input order.

use rayon::prelude::*;
use serde::Serialize;

use crate::dispatch::{resolve_request, MissionError, ResolveOutcome, ResolveRequest, UniverseLimits};
use crate::parallel::pool::WorkerPool;

/// One batch result. Exactly one of `outcome` / `error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchEntry {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<ResolveOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

impl BatchEntry {
    fn from_result(index: usize, result: Result<ResolveOutcome, MissionError>) -> Self {
        match result {
            Ok(outcome) => Self {
                index,
                outcome: Some(outcome),
                error: None,
                code: None,
            },
            Err(err) => Self {
                index,
                outcome: None,
                error: Some(err.to_string()),
                code: Some(err.code()),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        self.outcome.is_some()
    }
}

pub fn resolve_batch(
    requests: &[ResolveRequest],
    limits: &UniverseLimits,
    pool: &WorkerPool,
) -> Result<Vec<BatchEntry>, rayon::ThreadPoolBuildError> {
    pool.install(|| {
        requests
            .par_iter()
            .enumerate()
            .map(|(index, request)| BatchEntry::from_result(index, resolve_request(request, limits)))
            .collect()
    })
}
