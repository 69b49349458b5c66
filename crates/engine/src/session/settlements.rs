// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Results of backend calls.

use super::Session;
use crate::message::Settlement;
use rw_adapters::{error_message, AuditApi};
use rw_core::{Clock, Effect, FetchReason, RemoteRunStatus, RunStatus};
use rw_state::messages;

impl<A: AuditApi, C: Clock> Session<A, C> {
    pub(super) async fn handle_settlement(&mut self, settlement: Settlement) {
        match settlement {
            Settlement::Triggered(Ok(response)) => {
                tracing::info!(run_id = %response.run_id, "audit run started");
                self.state.run_id = Some(response.run_id.clone());
                self.execute(Effect::OpenStream { run_id: response.run_id }).await;
            }
            Settlement::Triggered(Err(e)) => {
                tracing::warn!(error = %e, "trigger failed");
                self.state.fail(error_message(&e, messages::TRIGGER_FAILED));
            }

            Settlement::RunStatus(Ok(response)) => match response.status {
                status if status.is_live() => {
                    tracing::info!(run_id = %response.run_id, status = ?status, "attaching to live run");
                    self.state.status = RunStatus::Streaming;
                    self.execute(Effect::OpenStream { run_id: response.run_id }).await;
                }
                RemoteRunStatus::Failed => {
                    let message = response
                        .error_message
                        .filter(|m| !m.is_empty())
                        .unwrap_or_else(|| messages::PAST_RUN_FAILED.to_string());
                    self.state.fail(message);
                }
                _ => {
                    self.execute(Effect::FetchCandidates {
                        run_id: response.run_id,
                        reason: FetchReason::PastRun,
                    })
                    .await;
                }
            },
            Settlement::RunStatus(Err(e)) => {
                tracing::warn!(run_id = ?self.state.run_id, error = %e, "run lookup failed");
                self.state.fail(error_message(&e, messages::LOAD_FAILED));
            }

            Settlement::Candidates { reason: FetchReason::PastRun, result } => match result {
                Ok(candidates) => {
                    self.state.replace_candidates(candidates);
                    self.state.mark_loaded(self.clock.now());
                }
                Err(e) => {
                    tracing::warn!(run_id = ?self.state.run_id, error = %e, "candidate fetch failed");
                    self.state.fail(error_message(&e, messages::LOAD_FAILED));
                }
            },
            Settlement::Candidates { reason: FetchReason::RunCompleted, result } => {
                match result {
                    Ok(candidates) => self.state.replace_candidates(candidates),
                    Err(e) => {
                        tracing::warn!(run_id = ?self.state.run_id, error = %e, "candidate fetch after completion failed");
                    }
                }
                self.execute(Effect::CloseStream).await;
            }

            Settlement::StreamOpened { run_id, result } => match result {
                Ok(stream) => self.executor.attach(run_id, stream).await,
                Err(e) => {
                    tracing::warn!(%run_id, error = %e, "failed to open audit stream");
                    self.state.disconnect();
                }
            },
        }
    }
}
