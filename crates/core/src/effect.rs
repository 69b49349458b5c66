// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effects represent side effects the session needs to perform

use crate::id::RunId;
use serde::{Deserialize, Serialize};

/// Why a candidate listing is being fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchReason {
    /// The live run sent `complete`. Best effort; the stream is closed once
    /// the fetch settles.
    RunCompleted,
    /// A finished run is being loaded. Failure is a run error.
    PastRun,
}

crate::simple_display! {
    FetchReason {
        RunCompleted => "run_completed",
        PastRun => "past_run",
    }
}

/// Effects that need to be executed by the session's executor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// Ask the backend to start a new run
    TriggerRun { lookback_days: u32 },

    /// Look up the status of an existing run
    FetchRunStatus { run_id: RunId },

    /// Fetch the authoritative candidate listing
    FetchCandidates { run_id: RunId, reason: FetchReason },

    /// Attach a live event stream, replacing any open one
    OpenStream { run_id: RunId },

    /// Tear down the live event stream (idempotent)
    CloseStream,
}

impl Effect {
    /// Effect name for log spans (e.g., "open_stream")
    pub fn name(&self) -> &'static str {
        match self {
            Effect::TriggerRun { .. } => "trigger_run",
            Effect::FetchRunStatus { .. } => "fetch_run_status",
            Effect::FetchCandidates { .. } => "fetch_candidates",
            Effect::OpenStream { .. } => "open_stream",
            Effect::CloseStream => "close_stream",
        }
    }

    /// Key/value pairs for structured logging
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Effect::TriggerRun { lookback_days } => {
                vec![("lookback_days", lookback_days.to_string())]
            }
            Effect::FetchRunStatus { run_id } | Effect::OpenStream { run_id } => {
                vec![("run_id", run_id.to_string())]
            }
            Effect::FetchCandidates { run_id, reason } => {
                vec![("run_id", run_id.to_string()), ("reason", reason.to_string())]
            }
            Effect::CloseStream => vec![],
        }
    }
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
