// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Loading past runs

use super::*;

#[tokio::test]
async fn finished_run_loads_candidates_and_completes_phases() {
    let ctx = setup();
    ctx.clock.set(at(60));
    ctx.api.set_run_status("R1", Ok(run_status("R1", "completed", None)));
    ctx.api.set_candidates("R1", Ok(vec![candidate_result("CAND1"), candidate_result("CAND2")]));

    ctx.handle.load_past_run("R1").await.unwrap();
    let state = ctx.wait_status(RunStatus::Completed).await;

    assert_eq!(state.run_id.as_deref(), Some("R1"));
    assert_eq!(state.candidates.len(), 2);
    for phase in &state.phases {
        assert_eq!(phase.status, StepStatus::Completed);
        assert_eq!(phase.detail.as_deref(), Some("Loaded from past run"));
        assert_eq!(phase.started_at, Some(at(60)));
        assert_eq!(phase.duration, Some(0.0));
    }
    assert!(!ctx.api.calls().iter().any(|c| matches!(c, ApiCall::OpenStream { .. })));
}

#[tokio::test]
async fn live_run_attaches_to_its_stream() {
    let ctx = setup();
    ctx.api.set_run_status("R1", Ok(run_status("R1", "running", None)));
    ctx.api.push_event("R1", &phase_start(Some("investigate"), at(5)));

    ctx.handle.load_past_run("R1").await.unwrap();
    let state = ctx.wait(|s| s.active_phase().is_some()).await;

    assert_eq!(state.status, RunStatus::Streaming);
    assert_eq!(state.active_phase().unwrap().name, PhaseName::Investigate);
    assert_eq!(state.phases[0].status, StepStatus::Completed);
    assert!(ctx.api.stream_open("R1"));
}

#[tokio::test]
async fn pending_run_attaches_to_its_stream() {
    let ctx = setup();
    ctx.api.set_run_status("R1", Ok(run_status("R1", "pending", None)));

    ctx.handle.load_past_run("R1").await.unwrap();
    ctx.wait_status(RunStatus::Streaming).await;
    ctx.until(|api| api.stream_open("R1")).await;
}

#[tokio::test]
async fn failed_run_shows_server_error() {
    let ctx = setup();
    ctx.api.set_run_status("R1", Ok(run_status("R1", "failed", Some("Out of memory"))));

    ctx.handle.load_past_run("R1").await.unwrap();
    let state = ctx.wait_status(RunStatus::Error).await;
    assert_eq!(state.error.as_deref(), Some("Out of memory"));
}

#[tokio::test]
async fn failed_run_without_message_uses_fallback() {
    let ctx = setup();
    ctx.api.set_run_status("R1", Ok(run_status("R1", "failed", None)));

    ctx.handle.load_past_run("R1").await.unwrap();
    let state = ctx.wait_status(RunStatus::Error).await;
    assert_eq!(state.error.as_deref(), Some("Audit run failed"));
}

#[tokio::test]
async fn unknown_run_surfaces_lookup_error() {
    let ctx = setup();

    ctx.handle.load_past_run("R404").await.unwrap();
    let state = ctx.wait_status(RunStatus::Error).await;
    assert_eq!(state.error.as_deref(), Some("Run not found"));
    assert_eq!(state.run_id.as_deref(), Some("R404"));
}

#[tokio::test]
async fn candidate_fetch_failure_on_load_is_an_error() {
    let ctx = setup();
    ctx.api.set_run_status("R1", Ok(run_status("R1", "completed", None)));
    ctx.api.set_candidates("R1", Err(ApiError::Transport(String::new())));

    ctx.handle.load_past_run("R1").await.unwrap();
    let state = ctx.wait_status(RunStatus::Error).await;
    assert_eq!(state.error.as_deref(), Some("Failed to load run data"));
}

#[tokio::test]
async fn run_stays_idle_while_status_is_looked_up() {
    let ctx = setup();
    let _gate = ctx.api.hold_candidates();
    ctx.api.set_run_status("R1", Ok(run_status("R1", "completed", None)));

    ctx.handle.load_past_run("R1").await.unwrap();
    ctx.until(|api| api.calls().contains(&ApiCall::Candidates { run_id: RunId::new("R1") }))
        .await;
    let state = ctx.handle.snapshot().await.unwrap();
    assert_eq!(state.status, RunStatus::Idle);
    assert_eq!(state.run_id.as_deref(), Some("R1"));
}

#[tokio::test]
async fn settled_state_of_loaded_run_is_complete() {
    let ctx = setup();
    ctx.api.set_run_status("R1", Ok(run_status("R1", "completed", None)));
    ctx.api.set_candidates("R1", Ok(vec![candidate_result("CAND1")]));

    ctx.handle.load_past_run("R1").await.unwrap();
    let state = tokio::time::timeout(WAIT, ctx.handle.wait_settled()).await.unwrap().unwrap();

    assert_eq!(state.status, RunStatus::Completed);
    assert_eq!(state.candidates.len(), 1);
}
