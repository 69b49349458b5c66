// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event normalizer: raw frame payload → canonical event record.

use chrono::{DateTime, Utc};
use rw_core::{AuditEvent, EventKind, Metadata};
use serde_json::{Map, Value};

/// Parse one frame payload into an [`AuditEvent`].
///
/// `fallback_type` is the event name the transport delivered the frame
/// under; it stands in for a missing `type` and `title`. `received_at`
/// stamps events whose timestamp is missing or unparseable.
///
/// Returns `None` when the payload is not a JSON object. Such frames are
/// dropped without touching run state.
pub fn normalize(data: &str, fallback_type: &str, received_at: DateTime<Utc>) -> Option<AuditEvent> {
    let parsed: Value = match serde_json::from_str(data) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!(error = %e, event = fallback_type, "dropping unparseable frame");
            return None;
        }
    };
    let Value::Object(mut obj) = parsed else {
        tracing::debug!(event = fallback_type, "dropping non-object frame");
        return None;
    };

    let kind = scalar_text(obj.get("type")).unwrap_or_else(|| fallback_type.to_string());
    let title = scalar_text(obj.get("title")).unwrap_or_else(|| fallback_type.to_string());
    let phase = match obj.get("phase") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };
    let detail = match obj.get("detail") {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    };
    let progress = obj.get("progress").and_then(Value::as_f64);
    let metadata = match obj.remove("metadata") {
        Some(Value::Object(map)) => Metadata::new(map),
        _ => Metadata::new(Map::new()),
    };
    let timestamp = obj
        .get("timestamp")
        .and_then(Value::as_str)
        .and_then(parse_timestamp)
        .unwrap_or(received_at);

    Some(AuditEvent {
        kind: EventKind::parse(&kind),
        phase,
        title,
        detail,
        progress,
        metadata,
        timestamp,
    })
}

/// Non-empty string, number or bool rendered as text.
fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// RFC 3339 with offset, or a naive ISO-8601 datetime read as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    raw.parse::<chrono::NaiveDateTime>().ok().map(|naive| naive.and_utc())
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
