// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::event::{AuditEvent, EventKind};
use chrono::{DateTime, Duration, Utc};
use serde_json::json;

/// Fixed base instant for event timestamps (2026-01-01T00:00:00Z).
pub fn t0() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(1_767_225_600, 0).unwrap_or_default()
}

/// `t0()` plus `secs` seconds.
pub fn at(secs: i64) -> DateTime<Utc> {
    t0() + Duration::seconds(secs)
}

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for stream event sequences.
pub mod strategies {
    use super::*;
    use proptest::prelude::*;

    pub fn arb_phase_name() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(Some("extract".to_string())),
            Just(Some("embed_cluster".to_string())),
            Just(Some("investigate".to_string())),
            Just(Some("artifacts".to_string())),
            Just(Some("unknown_phase".to_string())),
            Just(None),
        ]
    }

    pub fn arb_cluster_id() -> impl Strategy<Value = Option<String>> {
        prop_oneof![Just(None), "C[0-3]".prop_map(Some)]
    }

    /// Any single stream event, timestamped within the first hour.
    pub fn arb_event() -> impl Strategy<Value = AuditEvent> {
        let secs = 0i64..3600;
        prop_oneof![
            (arb_phase_name(), secs.clone()).prop_map(|(p, s)| phase_start(p.as_deref(), at(s))),
            (arb_phase_name(), secs.clone())
                .prop_map(|(p, s)| progress(p.as_deref(), Some("done"), at(s))),
            (arb_cluster_id(), secs.clone()).prop_map(|(c, s)| hypothesis(c.as_deref(), at(s))),
            ("[a-z_]{1,12}", secs.clone()).prop_map(|(t, s)| agent_tool(&t, at(s))),
            (arb_cluster_id(), secs.clone())
                .prop_map(|(c, s)| candidate(c.as_deref(), Some("CAND"), None, at(s))),
            secs.clone().prop_map(|s| complete(at(s))),
            secs.prop_map(|s| error(Some("boom"), at(s))),
        ]
    }

    pub fn arb_events(max: usize) -> impl Strategy<Value = Vec<AuditEvent>> {
        proptest::collection::vec(arb_event(), 0..max)
    }
}

// ── Event factory functions ─────────────────────────────────────────────────

pub fn phase_start(phase: Option<&str>, ts: DateTime<Utc>) -> AuditEvent {
    let mut event = AuditEvent::new(EventKind::PhaseStart, ts);
    event.phase = phase.map(str::to_string);
    event
}

pub fn progress(phase: Option<&str>, detail: Option<&str>, ts: DateTime<Utc>) -> AuditEvent {
    let mut event = AuditEvent::new(EventKind::Progress, ts);
    event.phase = phase.map(str::to_string);
    event.detail = detail.map(str::to_string);
    event
}

pub fn hypothesis(cluster_id: Option<&str>, ts: DateTime<Utc>) -> AuditEvent {
    let mut event = AuditEvent::new(EventKind::Hypothesis, ts);
    event.title = "Investigating cluster".to_string();
    if let Some(id) = cluster_id {
        event.metadata.insert("cluster_id", id);
    }
    event
}

pub fn agent_tool(tool: &str, ts: DateTime<Utc>) -> AuditEvent {
    let mut event = AuditEvent::new(EventKind::AgentTool, ts);
    event.title = format!("Calling {tool}");
    event.metadata.insert("tool_name", tool);
    event
}

pub fn candidate(
    cluster_id: Option<&str>,
    candidate_id: Option<&str>,
    pattern_name: Option<&str>,
    ts: DateTime<Utc>,
) -> AuditEvent {
    let mut event = AuditEvent::new(EventKind::Candidate, ts);
    if let Some(id) = cluster_id {
        event.metadata.insert("cluster_id", id);
    }
    if let Some(id) = candidate_id {
        event.metadata.insert("candidate_id", id);
    }
    if let Some(name) = pattern_name {
        event.metadata.insert("pattern_name", name);
    }
    event
}

pub fn complete(ts: DateTime<Utc>) -> AuditEvent {
    AuditEvent::new(EventKind::Complete, ts)
}

pub fn error(detail: Option<&str>, ts: DateTime<Utc>) -> AuditEvent {
    let mut event = AuditEvent::new(EventKind::Error, ts);
    event.detail = detail.map(str::to_string);
    event
}

/// Serialize an event the way the backend puts it on the wire.
pub fn wire_json(event: &AuditEvent) -> String {
    json!({
        "type": event.kind.as_str(),
        "phase": event.phase,
        "title": event.title,
        "detail": event.detail,
        "progress": event.progress,
        "metadata": event.metadata,
        "timestamp": event.timestamp.to_rfc3339(),
    })
    .to_string()
}
