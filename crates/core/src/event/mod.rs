// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Canonical audit stream events.
//!
//! Every field a handler reads has already been defaulted by the normalizer,
//! so handlers never see a missing title or timestamp.

mod metadata;

pub use metadata::Metadata;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The event types the audit stream emits.
///
/// Anything else is carried as `Other` and ignored by dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    PhaseStart,
    Progress,
    Hypothesis,
    AgentTool,
    Candidate,
    Complete,
    Error,
    Other(String),
}

impl EventKind {
    pub fn parse(name: &str) -> Self {
        match name {
            "phase_start" => EventKind::PhaseStart,
            "progress" => EventKind::Progress,
            "hypothesis" => EventKind::Hypothesis,
            "agent_tool" => EventKind::AgentTool,
            "candidate" => EventKind::Candidate,
            "complete" => EventKind::Complete,
            "error" => EventKind::Error,
            other => EventKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EventKind::PhaseStart => "phase_start",
            EventKind::Progress => "progress",
            EventKind::Hypothesis => "hypothesis",
            EventKind::AgentTool => "agent_tool",
            EventKind::Candidate => "candidate",
            EventKind::Complete => "complete",
            EventKind::Error => "error",
            EventKind::Other(name) => name,
        }
    }

    /// `complete` and `error` end the run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, EventKind::Complete | EventKind::Error)
    }
}

impl From<String> for EventKind {
    fn from(s: String) -> Self {
        EventKind::parse(&s)
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normalized message from the audit stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub phase: Option<String>,
    pub title: String,
    pub detail: Option<String>,
    pub progress: Option<f64>,
    pub metadata: Metadata,
    pub timestamp: DateTime<Utc>,
}

impl AuditEvent {
    /// A bare event of `kind` with every optional field empty.
    pub fn new(kind: EventKind, timestamp: DateTime<Utc>) -> Self {
        Self {
            title: kind.as_str().to_string(),
            kind,
            phase: None,
            detail: None,
            progress: None,
            metadata: Metadata::default(),
            timestamp,
        }
    }

    /// The event detail, treating an empty string as absent.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref().filter(|d| !d.is_empty())
    }
}

#[cfg(test)]
#[path = "../event_tests.rs"]
mod tests;
