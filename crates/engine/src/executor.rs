// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effect executor

use crate::bridge::stream_bridge;
use crate::message::{Message, Settlement};
use rw_adapters::{AuditApi, FrameStream};
use rw_core::{Effect, RunId};
use rw_wire::TriggerRunRequest;
use std::future::Future;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// The one live connection.
struct StreamConn {
    conn: u64,
    run_id: RunId,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

/// Executes effects against the backend on behalf of the session.
///
/// Backend calls run as spawned tasks that post a [`Settlement`] back to the
/// session queue, tagged with the epoch they were issued in. Starting a new
/// epoch cancels every call still in flight.
pub(crate) struct Executor<A> {
    api: A,
    /// Weak so that the session shuts down once every handle is dropped.
    tx: mpsc::WeakSender<Message>,
    epoch: u64,
    epoch_token: CancellationToken,
    /// Backend calls of the current epoch that have not settled yet.
    in_flight: usize,
    next_conn: u64,
    stream: Option<StreamConn>,
}

impl<A: AuditApi> Executor<A> {
    pub(crate) fn new(api: A, tx: mpsc::WeakSender<Message>) -> Self {
        Self {
            api,
            tx,
            epoch: 0,
            epoch_token: CancellationToken::new(),
            in_flight: 0,
            next_conn: 0,
            stream: None,
        }
    }

    pub(crate) fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Id of the live connection, if any.
    pub(crate) fn current_conn(&self) -> Option<u64> {
        self.stream.as_ref().map(|s| s.conn)
    }

    /// No connection open and no backend call outstanding.
    pub(crate) fn is_idle(&self) -> bool {
        self.stream.is_none() && self.in_flight == 0
    }

    /// A settlement of the current epoch arrived.
    pub(crate) fn settled(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    /// Close the connection, cancel in-flight calls and move to a new epoch.
    pub(crate) async fn begin_epoch(&mut self) {
        self.close_stream().await;
        self.epoch_token.cancel();
        self.epoch_token = CancellationToken::new();
        self.in_flight = 0;
        self.epoch += 1;
        tracing::debug!(epoch = self.epoch, "new session epoch");
    }

    /// Execute a single effect with tracing
    pub(crate) async fn execute(&mut self, effect: Effect) {
        let info: String =
            effect.fields().iter().map(|(k, v)| format!("{k}={v}")).collect::<Vec<_>>().join(" ");
        tracing::info!(epoch = self.epoch, "executing effect={} {}", effect.name(), info);

        match effect {
            Effect::TriggerRun { lookback_days } => {
                let api = self.api.clone();
                self.spawn_call(async move {
                    Settlement::Triggered(
                        api.trigger_run(TriggerRunRequest::full(lookback_days)).await,
                    )
                });
            }
            Effect::FetchRunStatus { run_id } => {
                let api = self.api.clone();
                self.spawn_call(async move { Settlement::RunStatus(api.run_status(&run_id).await) });
            }
            Effect::FetchCandidates { run_id, reason } => {
                let api = self.api.clone();
                self.spawn_call(async move {
                    Settlement::Candidates { reason, result: api.candidates(&run_id).await }
                });
            }
            Effect::OpenStream { run_id } => {
                self.close_stream().await;
                let api = self.api.clone();
                self.spawn_call(async move {
                    let result = api.open_stream(&run_id).await;
                    Settlement::StreamOpened { run_id, result }
                });
            }
            Effect::CloseStream => self.close_stream().await,
        }
    }

    /// Hand an opened stream to a new bridge task. Any previous connection
    /// is closed first.
    pub(crate) async fn attach(&mut self, run_id: RunId, stream: FrameStream) {
        self.close_stream().await;
        self.next_conn += 1;
        let conn = self.next_conn;
        let cancel = CancellationToken::new();
        let bridge = stream_bridge(stream, run_id.clone(), conn, self.tx.clone(), cancel.clone());
        let task = tokio::spawn(bridge);
        tracing::info!(%run_id, conn, "stream attached");
        self.stream = Some(StreamConn { conn, run_id, cancel, task });
    }

    /// Stop the bridge and wait for it to drop its stream. Idempotent.
    pub(crate) async fn close_stream(&mut self) {
        let Some(stream) = self.stream.take() else {
            return;
        };
        stream.cancel.cancel();
        if let Err(e) = stream.task.await {
            tracing::warn!(run_id = %stream.run_id, conn = stream.conn, error = %e, "stream bridge task failed");
        }
        tracing::info!(run_id = %stream.run_id, conn = stream.conn, "stream closed");
    }

    fn spawn_call<F>(&mut self, call: F)
    where
        F: Future<Output = Settlement> + Send + 'static,
    {
        let Some(tx) = self.tx.upgrade() else {
            return;
        };
        self.in_flight += 1;
        let epoch = self.epoch;
        let token = self.epoch_token.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!(epoch, "backend call cancelled");
                }
                settlement = call => {
                    let _ = tx.send(Message::Settled { epoch, settlement }).await;
                }
            }
        });
    }
}
