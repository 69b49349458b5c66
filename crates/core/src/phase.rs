// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Audit phases and the shared step status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a phase or a cluster: pending → active → completed.
///
/// Completed is terminal; nothing moves a step backwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    #[default]
    Pending,
    Active,
    Completed,
}

impl StepStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, StepStatus::Completed)
    }
}

crate::simple_display! {
    StepStatus {
        Pending => "pending",
        Active => "active",
        Completed => "completed",
    }
}

/// The four fixed stages of an audit run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseName {
    Extract,
    EmbedCluster,
    Investigate,
    Artifacts,
}

impl PhaseName {
    pub const ALL: [PhaseName; 4] =
        [PhaseName::Extract, PhaseName::EmbedCluster, PhaseName::Investigate, PhaseName::Artifacts];

    /// Parse a wire name. Unknown names have no place in the ordering.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "extract" => Some(PhaseName::Extract),
            "embed_cluster" => Some(PhaseName::EmbedCluster),
            "investigate" => Some(PhaseName::Investigate),
            "artifacts" => Some(PhaseName::Artifacts),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            PhaseName::Extract => "Extract Fraud Evidence",
            PhaseName::EmbedCluster => "Embed & Cluster",
            PhaseName::Investigate => "Investigate Clusters",
            PhaseName::Artifacts => "Write Artifacts",
        }
    }

    /// Detail used when the phase is completed without a progress event
    /// saying what it produced.
    pub fn auto_detail(self) -> &'static str {
        match self {
            PhaseName::Extract => "Extraction complete",
            PhaseName::EmbedCluster => "Clustering complete",
            PhaseName::Investigate => "Investigation complete",
            PhaseName::Artifacts => "Artifacts queued",
        }
    }
}

crate::simple_display! {
    PhaseName {
        Extract => "extract",
        EmbedCluster => "embed_cluster",
        Investigate => "investigate",
        Artifacts => "artifacts",
    }
}

/// Position of a phase name in the run order, `None` when unknown.
pub fn phase_index(name: Option<&str>) -> Option<usize> {
    name.and_then(PhaseName::parse).map(PhaseName::index)
}

/// One stage of the run as reconstructed from the stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub name: PhaseName,
    pub label: String,
    pub status: StepStatus,
    pub detail: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    /// Seconds between start and completion.
    pub duration: Option<f64>,
}

impl Phase {
    pub fn new(name: PhaseName) -> Self {
        Self {
            name,
            label: name.label().to_string(),
            status: StepStatus::Pending,
            detail: None,
            started_at: None,
            duration: None,
        }
    }

    /// All four phases in order, every one pending.
    pub fn initial_set() -> Vec<Phase> {
        PhaseName::ALL.iter().copied().map(Phase::new).collect()
    }

    /// Pending → active. Active or completed phases keep their start time.
    pub fn start(&mut self, at: DateTime<Utc>) -> bool {
        if self.status != StepStatus::Pending {
            return false;
        }
        self.status = StepStatus::Active;
        self.started_at = Some(at);
        true
    }

    /// Move to completed, filling in a missing detail and timing the phase
    /// when its start is known. No-op on a completed phase.
    pub fn complete(&mut self, at: DateTime<Utc>, fallback_detail: &str) -> bool {
        if self.status.is_completed() {
            return false;
        }
        self.status = StepStatus::Completed;
        if self.detail.as_deref().is_none_or(str::is_empty) {
            self.detail = Some(fallback_detail.to_string());
        }
        if let (Some(started), None) = (self.started_at, self.duration) {
            self.duration = Some(seconds_between(started, at));
        }
        true
    }
}

/// Fractional seconds from `start` to `end`, zero when `end` is earlier.
pub fn seconds_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    ((end - start).num_milliseconds() as f64 / 1000.0).max(0.0)
}

#[cfg(test)]
#[path = "phase_tests.rs"]
mod tests;
