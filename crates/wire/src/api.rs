// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! REST bodies for the background-audit endpoints.

use rw_core::{CandidateResult, RemoteRunStatus, RunId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    #[default]
    Full,
}

/// Body of `POST /trigger`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerRunRequest {
    pub lookback_days: u32,
    pub run_mode: RunMode,
}

impl TriggerRunRequest {
    pub fn full(lookback_days: u32) -> Self {
        Self { lookback_days, run_mode: RunMode::Full }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerRunResponse {
    pub run_id: RunId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Body of `GET /runs/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStatusResponse {
    pub run_id: RunId,
    pub status: RemoteRunStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Body of `GET /runs/{id}/candidates`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateListResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub candidates: Vec<CandidateResult>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<CandidateResult>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<CandidateResult>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
