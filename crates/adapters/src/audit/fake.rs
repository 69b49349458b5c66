// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scriptable in-memory [`AuditApi`] for tests.

use super::{ApiError, AuditApi, FrameStream};
use async_trait::async_trait;
use parking_lot::Mutex;
use rw_core::{AuditEvent, CandidateResult, RunId};
use rw_wire::{RunStatusResponse, SseFrame, TriggerRunRequest, TriggerRunResponse};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::{mpsc, Notify};

type FrameTx = mpsc::UnboundedSender<Result<SseFrame, ApiError>>;
type FrameRx = mpsc::UnboundedReceiver<Result<SseFrame, ApiError>>;

/// Recorded backend call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    TriggerRun { lookback_days: u32 },
    RunStatus { run_id: RunId },
    Candidates { run_id: RunId },
    OpenStream { run_id: RunId },
}

/// One run's stream. Frames pushed before the stream is opened are
/// buffered in the channel.
struct FakeStream {
    tx: FrameTx,
    rx: Option<FrameRx>,
}

impl FakeStream {
    fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx: Some(rx) }
    }
}

#[derive(Default)]
struct FakeApiState {
    triggers: VecDeque<Result<TriggerRunResponse, ApiError>>,
    statuses: HashMap<RunId, Result<RunStatusResponse, ApiError>>,
    candidates: HashMap<RunId, Result<Vec<CandidateResult>, ApiError>>,
    open_failures: HashMap<RunId, ApiError>,
    streams: HashMap<RunId, FakeStream>,
    candidates_gate: Option<Arc<Notify>>,
    calls: Vec<ApiCall>,
}

/// Fake audit backend for testing
#[derive(Clone, Default)]
pub struct FakeAuditApi {
    inner: Arc<Mutex<FakeApiState>>,
}

impl FakeAuditApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result of the next `trigger_run` call.
    pub fn push_trigger(&self, result: Result<TriggerRunResponse, ApiError>) {
        self.inner.lock().triggers.push_back(result);
    }

    /// Queue a successful trigger returning `run_id`.
    pub fn trigger_returns(&self, run_id: &str) {
        self.push_trigger(Ok(TriggerRunResponse { run_id: RunId::new(run_id), status: None }));
    }

    pub fn set_run_status(&self, run_id: &str, result: Result<RunStatusResponse, ApiError>) {
        self.inner.lock().statuses.insert(RunId::new(run_id), result);
    }

    pub fn set_candidates(&self, run_id: &str, result: Result<Vec<CandidateResult>, ApiError>) {
        self.inner.lock().candidates.insert(RunId::new(run_id), result);
    }

    /// Make the next `open_stream` for `run_id` fail.
    pub fn fail_open(&self, run_id: &str, err: ApiError) {
        self.inner.lock().open_failures.insert(RunId::new(run_id), err);
    }

    /// Hold every `candidates` call until the returned handle is notified
    /// (once per held call).
    pub fn hold_candidates(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.inner.lock().candidates_gate = Some(Arc::clone(&gate));
        gate
    }

    fn send(&self, run_id: &str, item: Result<SseFrame, ApiError>) {
        let mut inner = self.inner.lock();
        let stream = inner.streams.entry(RunId::new(run_id)).or_insert_with(FakeStream::new);
        let _ = stream.tx.send(item);
    }

    pub fn push_frame(&self, run_id: &str, event: &str, data: &str) {
        self.send(
            run_id,
            Ok(SseFrame { event: event.to_string(), data: data.to_string() }),
        );
    }

    /// Push an event encoded the way the backend sends it.
    pub fn push_event(&self, run_id: &str, event: &AuditEvent) {
        self.push_frame(run_id, event.kind.as_str(), &rw_core::test_support::wire_json(event));
    }

    /// Deliver a transport error on the stream.
    pub fn fail_stream(&self, run_id: &str, err: ApiError) {
        self.send(run_id, Err(err));
    }

    /// End the stream from the backend side, after buffered frames.
    pub fn end_stream(&self, run_id: &str) {
        self.inner.lock().streams.remove(run_id);
    }

    /// Whether a consumer currently holds the stream for `run_id`.
    pub fn stream_open(&self, run_id: &str) -> bool {
        self.inner
            .lock()
            .streams
            .get(run_id)
            .is_some_and(|s| s.rx.is_none() && !s.tx.is_closed())
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ApiCall> {
        self.inner.lock().calls.clone()
    }
}

#[async_trait]
impl AuditApi for FakeAuditApi {
    async fn trigger_run(&self, request: TriggerRunRequest) -> Result<TriggerRunResponse, ApiError> {
        let mut inner = self.inner.lock();
        inner.calls.push(ApiCall::TriggerRun { lookback_days: request.lookback_days });
        inner
            .triggers
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted trigger response".into())))
    }

    async fn run_status(&self, run_id: &RunId) -> Result<RunStatusResponse, ApiError> {
        let mut inner = self.inner.lock();
        inner.calls.push(ApiCall::RunStatus { run_id: run_id.clone() });
        inner.statuses.get(run_id).cloned().unwrap_or_else(|| {
            Err(ApiError::status(404, r#"{"detail":"Run not found"}"#))
        })
    }

    async fn candidates(&self, run_id: &RunId) -> Result<Vec<CandidateResult>, ApiError> {
        let gate = {
            let mut inner = self.inner.lock();
            inner.calls.push(ApiCall::Candidates { run_id: run_id.clone() });
            inner.candidates_gate.clone()
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.inner.lock().candidates.get(run_id).cloned().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn open_stream(&self, run_id: &RunId) -> Result<FrameStream, ApiError> {
        let mut inner = self.inner.lock();
        inner.calls.push(ApiCall::OpenStream { run_id: run_id.clone() });
        if let Some(err) = inner.open_failures.remove(run_id) {
            return Err(err);
        }
        let stream = inner.streams.entry(run_id.clone()).or_insert_with(FakeStream::new);
        let rx = match stream.rx.take() {
            Some(rx) => rx,
            None => {
                *stream = FakeStream::new();
                stream.rx.take().ok_or_else(|| ApiError::Transport("stream unavailable".into()))?
            }
        };
        Ok(Box::pin(futures_util::stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|item| (item, rx))
        })))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
