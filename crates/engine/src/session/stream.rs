// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Frames and end-of-stream from the live connection.

use super::Session;
use rw_adapters::{ApiError, AuditApi};
use rw_core::{Clock, Effect, EventKind, FetchReason, RunStatus};
use rw_wire::SseFrame;

impl<A: AuditApi, C: Clock> Session<A, C> {
    pub(super) async fn handle_frame(&mut self, conn: u64, frame: SseFrame) {
        if self.executor.current_conn() != Some(conn) {
            tracing::debug!(conn, "dropping frame from closed connection");
            return;
        }
        let Some(event) = rw_wire::normalize(&frame.data, &frame.event, self.clock.now()) else {
            return;
        };
        if self.state.status != RunStatus::Streaming {
            tracing::debug!(event = %event.kind, status = %self.state.status, "dropping event for settled run");
            return;
        }

        tracing::debug!(conn, event = %event.kind, phase = ?event.phase, "applying event");
        self.state.apply_event(&event);

        if !event.kind.is_terminal() {
            return;
        }
        if event.kind == EventKind::Error {
            tracing::warn!(run_id = ?self.state.run_id, error = ?self.state.error, "run failed");
            self.execute(Effect::CloseStream).await;
            return;
        }

        tracing::info!(run_id = ?self.state.run_id, "run completed");
        match self.state.run_id.clone() {
            Some(run_id) => {
                self.execute(Effect::FetchCandidates { run_id, reason: FetchReason::RunCompleted })
                    .await
            }
            None => self.execute(Effect::CloseStream).await,
        }
    }

    pub(super) async fn handle_stream_end(&mut self, conn: u64, error: Option<ApiError>) {
        if self.executor.current_conn() != Some(conn) {
            return;
        }
        if self.state.disconnect() {
            tracing::warn!(
                run_id = ?self.state.run_id,
                error = ?error.map(|e| e.to_string()),
                "audit stream disconnected"
            );
        }
        self.execute(Effect::CloseStream).await;
    }
}
