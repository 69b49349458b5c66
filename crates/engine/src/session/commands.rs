// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::Session;
use crate::message::Command;
use rw_adapters::AuditApi;
use rw_core::{Clock, Effect, RunStatus};

impl<A: AuditApi, C: Clock> Session<A, C> {
    pub(super) async fn handle_command(&mut self, command: Command) {
        match command {
            Command::TriggerRun { lookback_days, ack } => {
                self.start_over().await;
                self.state.status = RunStatus::Streaming;
                self.execute(Effect::TriggerRun { lookback_days }).await;
                self.publish();
                let _ = ack.send(());
            }
            Command::LoadPastRun { run_id, ack } => {
                self.start_over().await;
                tracing::info!(%run_id, "loading past run");
                self.state.run_id = Some(run_id.clone());
                self.execute(Effect::FetchRunStatus { run_id }).await;
                self.publish();
                let _ = ack.send(());
            }
            Command::Reset { ack } => {
                self.start_over().await;
                self.publish();
                let _ = ack.send(());
            }
            Command::SelectCluster { id, ack } => {
                self.state.select_cluster(id);
                self.publish();
                let _ = ack.send(());
            }
            Command::SelectCandidate { id, ack } => {
                self.state.select_candidate(id);
                self.publish();
                let _ = ack.send(());
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.state.clone());
            }
        }
    }
}
