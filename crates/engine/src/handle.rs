// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::error::SessionError;
use crate::message::{Command, Message};
use rw_core::{CandidateId, ClusterId, RunId};
use rw_state::RunState;
use tokio::sync::{mpsc, oneshot, watch};

/// Cloneable handle to a running [`crate::Session`].
///
/// Every call returns once the session has applied it. `trigger_run` and
/// `load_past_run` return before the backend answers; follow progress with
/// [`SessionHandle::subscribe`], [`SessionHandle::wait_for`] or
/// [`SessionHandle::wait_settled`].
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<Message>,
    state_rx: watch::Receiver<RunState>,
    idle_rx: watch::Receiver<bool>,
}

impl SessionHandle {
    pub(crate) fn new(
        tx: mpsc::Sender<Message>,
        state_rx: watch::Receiver<RunState>,
        idle_rx: watch::Receiver<bool>,
    ) -> Self {
        Self { tx, state_rx, idle_rx }
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Message::Command(command(reply_tx)))
            .await
            .map_err(|_| SessionError::Closed)?;
        reply_rx.await.map_err(|_| SessionError::Closed)
    }

    /// Start a fresh run over the last `lookback_days` days, abandoning any
    /// run in progress.
    pub async fn trigger_run(&self, lookback_days: u32) -> Result<(), SessionError> {
        self.request(|ack| Command::TriggerRun { lookback_days, ack }).await
    }

    /// Show an existing run: attach to it while it is still going, otherwise
    /// load its final candidates.
    pub async fn load_past_run(&self, run_id: impl Into<RunId>) -> Result<(), SessionError> {
        let run_id = run_id.into();
        self.request(|ack| Command::LoadPastRun { run_id, ack }).await
    }

    /// Close the stream and return to the idle baseline.
    pub async fn reset(&self) -> Result<(), SessionError> {
        self.request(|ack| Command::Reset { ack }).await
    }

    pub async fn select_cluster(&self, id: impl Into<ClusterId>) -> Result<(), SessionError> {
        let id = id.into();
        self.request(|ack| Command::SelectCluster { id, ack }).await
    }

    pub async fn select_candidate(&self, id: impl Into<CandidateId>) -> Result<(), SessionError> {
        let id = id.into();
        self.request(|ack| Command::SelectCandidate { id, ack }).await
    }

    pub async fn snapshot(&self) -> Result<RunState, SessionError> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Receives the run state every time it changes.
    pub fn subscribe(&self) -> watch::Receiver<RunState> {
        self.state_rx.clone()
    }

    /// Wait until the published state satisfies `predicate`.
    pub async fn wait_for(
        &self,
        predicate: impl FnMut(&RunState) -> bool,
    ) -> Result<RunState, SessionError> {
        let mut rx = self.state_rx.clone();
        let state = rx.wait_for(predicate).await.map_err(|_| SessionError::Closed)?;
        Ok(RunState::clone(&state))
    }

    /// Wait until the session has no open stream and no backend call in
    /// flight, then return the state at that point.
    ///
    /// After `trigger_run` or `load_past_run` this resolves once the run has
    /// reached its final state, including the candidate fetch that follows
    /// completion.
    pub async fn wait_settled(&self) -> Result<RunState, SessionError> {
        let mut idle = self.idle_rx.clone();
        idle.wait_for(|idle| *idle).await.map_err(|_| SessionError::Closed)?;
        Ok(RunState::clone(&self.state_rx.borrow()))
    }
}
