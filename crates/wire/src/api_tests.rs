// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[test]
fn trigger_request_body() {
    let body = serde_json::to_value(TriggerRunRequest::full(7)).unwrap();
    assert_eq!(body, json!({"lookback_days": 7, "run_mode": "full"}));
}

#[test]
fn trigger_response_status_is_optional() {
    let resp: TriggerRunResponse = serde_json::from_str(r#"{"run_id": "R1"}"#).unwrap();
    assert_eq!(resp.run_id, "R1");
    assert_eq!(resp.status, None);
}

#[test]
fn run_status_with_error_message() {
    let resp: RunStatusResponse = serde_json::from_str(
        r#"{"run_id": "R1", "status": "failed", "error_message": "embedding service down"}"#,
    )
    .unwrap();
    assert_eq!(resp.status, RemoteRunStatus::Failed);
    assert_eq!(resp.error_message.as_deref(), Some("embedding service down"));
}

#[yare::parameterized(
    missing = { "{}" },
    null    = { r#"{"candidates": null}"# },
    empty   = { r#"{"candidates": []}"# },
)]
fn candidate_list_defaults_to_empty(body: &str) {
    let resp: CandidateListResponse = serde_json::from_str(body).unwrap();
    assert!(resp.candidates.is_empty());
}

#[test]
fn candidate_list_parses_entries() {
    let resp: CandidateListResponse = serde_json::from_value(json!({
        "candidates": [{
            "candidate_id": "CAND1",
            "title": "No Trade",
            "status": "accepted",
            "quality_score": 0.7,
            "confidence": 0.82,
            "support_events": 5,
            "novelty_status": "novel",
            "pattern_card": {"formal_pattern_name": "No Trade"}
        }]
    }))
    .unwrap();
    assert_eq!(resp.candidates.len(), 1);
    assert_eq!(resp.candidates[0].candidate_id, "CAND1");
    assert_eq!(resp.candidates[0].support_events, 5);
}
