// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Everything the session actor consumes, on one queue.

use rw_adapters::{ApiError, FrameStream};
use rw_core::{CandidateId, CandidateResult, ClusterId, FetchReason, RunId};
use rw_state::RunState;
use rw_wire::{RunStatusResponse, SseFrame, TriggerRunResponse};
use tokio::sync::oneshot;

/// Requests from a [`crate::SessionHandle`]. Each is acknowledged once the
/// session has applied it.
pub(crate) enum Command {
    TriggerRun { lookback_days: u32, ack: oneshot::Sender<()> },
    LoadPastRun { run_id: RunId, ack: oneshot::Sender<()> },
    Reset { ack: oneshot::Sender<()> },
    SelectCluster { id: ClusterId, ack: oneshot::Sender<()> },
    SelectCandidate { id: CandidateId, ack: oneshot::Sender<()> },
    Snapshot { reply: oneshot::Sender<RunState> },
}

/// Result of a backend call made on the session's behalf.
pub(crate) enum Settlement {
    Triggered(Result<TriggerRunResponse, ApiError>),
    RunStatus(Result<RunStatusResponse, ApiError>),
    Candidates { reason: FetchReason, result: Result<Vec<CandidateResult>, ApiError> },
    StreamOpened { run_id: RunId, result: Result<FrameStream, ApiError> },
}

pub(crate) enum Message {
    Command(Command),
    /// A frame read on connection `conn`.
    Frame { conn: u64, frame: SseFrame },
    /// Connection `conn` ended, cleanly (`None`) or with a read error.
    StreamEnded { conn: u64, error: Option<ApiError> },
    /// A backend call issued during `epoch` finished.
    Settled { epoch: u64, settlement: Settlement },
}
