// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Triggering new runs

use super::*;

#[tokio::test]
async fn triggered_run_is_reconstructed_from_its_stream() {
    let ctx = setup();
    ctx.api.trigger_returns("R1");
    ctx.api.set_candidates("R1", Ok(vec![candidate_result("CAND1")]));

    let mut hyp = hypothesis(Some("C1"), at(20));
    hyp.title = "Investigating C1".to_string();
    for event in [
        phase_start(Some("extract"), at(0)),
        progress(Some("extract"), Some("120 units"), at(10)),
        phase_start(Some("embed_cluster"), at(10)),
        progress(Some("embed_cluster"), None, at(18)),
        hyp,
        agent_tool("sql_db_query", at(22)),
        candidate(Some("C1"), Some("CAND1"), Some("No Trade"), at(30)),
        complete(at(40)),
    ] {
        ctx.api.push_event("R1", &event);
    }

    ctx.handle.trigger_run(7).await.unwrap();
    let state = ctx.wait(|s| s.status == RunStatus::Completed && !s.candidates.is_empty()).await;

    assert_eq!(state.run_id.as_deref(), Some("R1"));
    assert!(state.phases.iter().all(|p| p.status == StepStatus::Completed));
    assert_eq!(state.phases[0].detail.as_deref(), Some("120 units"));
    let cluster = state.cluster("C1").unwrap();
    assert_eq!(cluster.status, StepStatus::Completed);
    assert_eq!(cluster.pattern_name.as_deref(), Some("No Trade"));
    assert_eq!(cluster.tool_calls[0].friendly_label, "Querying the database...");
    assert_eq!(state.candidates[0].candidate_id, "CAND1");
    assert_eq!(state.error, None);

    ctx.until(|api| !api.stream_open("R1")).await;
    let calls = ctx.api.calls();
    assert_eq!(calls[0], ApiCall::TriggerRun { lookback_days: 7 });
    assert!(calls.contains(&ApiCall::OpenStream { run_id: RunId::new("R1") }));
    assert!(calls.contains(&ApiCall::Candidates { run_id: RunId::new("R1") }));
}

#[tokio::test]
async fn trigger_failure_surfaces_server_detail() {
    let ctx = setup();
    ctx.api.push_trigger(Err(ApiError::status(409, r#"{"detail":"Run already in progress"}"#)));

    ctx.handle.trigger_run(7).await.unwrap();
    let state = ctx.wait_status(RunStatus::Error).await;

    assert_eq!(state.error.as_deref(), Some("Run already in progress"));
    assert_eq!(state.run_id, None);
    assert!(!ctx.api.calls().iter().any(|c| matches!(c, ApiCall::OpenStream { .. })));
}

#[tokio::test]
async fn trigger_failure_without_message_uses_fallback() {
    let ctx = setup();
    ctx.api.push_trigger(Err(ApiError::Transport(String::new())));

    ctx.handle.trigger_run(7).await.unwrap();
    let state = ctx.wait_status(RunStatus::Error).await;

    assert_eq!(state.error.as_deref(), Some("Failed to start audit run"));
}

#[tokio::test]
async fn new_trigger_replaces_previous_run() {
    let ctx = setup();
    ctx.trigger("R1").await;
    ctx.api.push_event("R1", &hypothesis(Some("C1"), at(1)));
    ctx.wait(|s| !s.clusters.is_empty()).await;

    ctx.api.trigger_returns("R2");
    ctx.handle.trigger_run(7).await.unwrap();
    assert!(!ctx.api.stream_open("R1"));

    ctx.until(|api| api.stream_open("R2")).await;
    let state = ctx.handle.snapshot().await.unwrap();
    assert_eq!(state.run_id.as_deref(), Some("R2"));
    assert!(state.clusters.is_empty());
    assert_eq!(state.status, RunStatus::Streaming);
}

#[tokio::test]
async fn settled_state_includes_candidates_fetched_after_completion() {
    let ctx = setup();
    ctx.api.trigger_returns("R1");
    ctx.api.set_candidates("R1", Ok(vec![candidate_result("CAND1")]));
    ctx.api.push_event("R1", &hypothesis(Some("C1"), at(1)));
    ctx.api.push_event("R1", &complete(at(2)));

    ctx.handle.trigger_run(7).await.unwrap();
    let state = tokio::time::timeout(WAIT, ctx.handle.wait_settled()).await.unwrap().unwrap();

    assert_eq!(state.status, RunStatus::Completed);
    assert_eq!(state.candidates.len(), 1);
    assert!(!ctx.api.stream_open("R1"));
}

#[tokio::test]
async fn settled_state_after_failed_trigger_is_the_error() {
    let ctx = setup();
    ctx.api.push_trigger(Err(ApiError::status(500, r#"{"message":"Backend unavailable"}"#)));

    ctx.handle.trigger_run(7).await.unwrap();
    let state = tokio::time::timeout(WAIT, ctx.handle.wait_settled()).await.unwrap().unwrap();

    assert_eq!(state.status, RunStatus::Error);
    assert_eq!(state.error.as_deref(), Some("Backend unavailable"));
}
