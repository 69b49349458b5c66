// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The aggregate run view

use crate::{clusters, correlation, messages, phases};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rw_core::{
    AuditEvent, CandidateId, CandidateResult, ClusterId, ClusterStep, EventKind, Phase,
    PhaseName, RunId, RunStatus, StepStatus,
};
use serde::{Deserialize, Serialize};

/// Everything known about one audit run, derived from its event stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub run_id: Option<RunId>,
    pub status: RunStatus,
    /// Always the four phases, in run order.
    pub phases: Vec<Phase>,
    /// Clusters in discovery order.
    pub clusters: Vec<ClusterStep>,
    pub candidates: Vec<CandidateResult>,
    pub selected_cluster_id: Option<ClusterId>,
    pub selected_candidate_id: Option<CandidateId>,
    pub error: Option<String>,
    /// Cluster → candidate, in the order candidates were announced.
    pub cluster_candidates: IndexMap<ClusterId, CandidateId>,
    /// The one cluster currently under investigation.
    pub active_cluster: Option<ClusterId>,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            run_id: None,
            status: RunStatus::Idle,
            phases: Phase::initial_set(),
            clusters: Vec::new(),
            candidates: Vec::new(),
            selected_cluster_id: None,
            selected_candidate_id: None,
            error: None,
            cluster_candidates: IndexMap::new(),
            active_cluster: None,
        }
    }
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the idle baseline.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn phase(&self, name: PhaseName) -> Option<&Phase> {
        self.phases.iter().find(|p| p.name == name)
    }

    pub fn active_phase(&self) -> Option<&Phase> {
        self.phases.iter().find(|p| p.status == StepStatus::Active)
    }

    pub fn cluster(&self, id: &str) -> Option<&ClusterStep> {
        self.clusters.iter().find(|c| c.cluster_id == *id)
    }

    pub fn candidate(&self, id: &str) -> Option<&CandidateResult> {
        self.candidates.iter().find(|c| c.candidate_id == *id)
    }

    /// Apply one normalized stream event.
    ///
    /// Handlers tolerate duplicated and reordered delivery: phases and
    /// clusters only ever move forward, and a redelivered hypothesis never
    /// creates a second cluster.
    pub fn apply_event(&mut self, event: &AuditEvent) {
        match &event.kind {
            EventKind::PhaseStart => phases::on_phase_start(&mut self.phases, event),
            EventKind::Progress => phases::on_progress(&mut self.phases, event),
            EventKind::Hypothesis => clusters::on_hypothesis(self, event),
            EventKind::AgentTool => clusters::on_agent_tool(self, event),
            EventKind::Candidate => clusters::on_candidate(self, event),
            EventKind::Complete => self.finish(event.timestamp),
            EventKind::Error => self.fail(event.detail().unwrap_or(messages::UNKNOWN_ERROR)),
            EventKind::Other(name) => {
                tracing::debug!(event = %name, "ignoring unrecognized event type");
            }
        }
    }

    /// The run finished: close out every phase and cluster.
    pub fn finish(&mut self, at: DateTime<Utc>) {
        phases::complete_all(&mut self.phases, at);
        clusters::complete_all(self);
        self.status = RunStatus::Completed;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = RunStatus::Error;
        self.error = Some(message.into());
    }

    /// The stream went away. Only a streaming run turns into an error; an
    /// error message already recorded is kept. Returns whether the status
    /// changed.
    pub fn disconnect(&mut self) -> bool {
        if self.status != RunStatus::Streaming {
            return false;
        }
        self.status = RunStatus::Error;
        if self.error.is_none() {
            self.error = Some(messages::DISCONNECTED.to_string());
        }
        true
    }

    /// Present a run that finished before it was loaded as fully done.
    pub fn mark_loaded(&mut self, now: DateTime<Utc>) {
        phases::mark_loaded(&mut self.phases, now);
        self.status = RunStatus::Completed;
    }

    /// Replace the candidate list with the backend's authoritative listing.
    pub fn replace_candidates(&mut self, candidates: Vec<CandidateResult>) {
        self.candidates = candidates;
    }

    pub fn select_cluster(&mut self, id: ClusterId) {
        correlation::select_cluster(self, id);
    }

    pub fn select_candidate(&mut self, id: CandidateId) {
        correlation::select_candidate(self, id);
    }
}

#[cfg(test)]
#[path = "run_state_tests.rs"]
mod tests;
