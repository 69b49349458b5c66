// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Live stream handling: terminal events, disconnects, stray frames

use super::*;

#[tokio::test]
async fn error_event_fails_run_and_closes_stream() {
    let ctx = setup();
    ctx.trigger("R1").await;
    ctx.api.push_event("R1", &error(Some("LLM quota exceeded"), at(5)));

    let state = ctx.wait_status(RunStatus::Error).await;
    assert_eq!(state.error.as_deref(), Some("LLM quota exceeded"));
    ctx.until(|api| !api.stream_open("R1")).await;
}

#[tokio::test]
async fn stream_end_without_terminal_event_is_a_disconnect() {
    let ctx = setup();
    ctx.trigger("R1").await;
    ctx.api.push_event("R1", &phase_start(Some("extract"), at(0)));
    ctx.api.end_stream("R1");

    let state = ctx.wait_status(RunStatus::Error).await;
    assert_eq!(state.error.as_deref(), Some("Audit stream disconnected"));
    assert_eq!(state.phase(PhaseName::Extract).unwrap().status, StepStatus::Active);
}

#[tokio::test]
async fn transport_error_is_a_disconnect() {
    let ctx = setup();
    ctx.trigger("R1").await;
    ctx.api.fail_stream("R1", ApiError::Transport("connection reset".into()));

    let state = ctx.wait_status(RunStatus::Error).await;
    assert_eq!(state.error.as_deref(), Some("Audit stream disconnected"));
    ctx.until(|api| !api.stream_open("R1")).await;
}

#[tokio::test]
async fn failing_to_open_the_stream_is_a_disconnect() {
    let ctx = setup();
    ctx.api.fail_open("R1", ApiError::status(502, ""));
    ctx.api.trigger_returns("R1");
    ctx.handle.trigger_run(7).await.unwrap();

    let state = ctx.wait_status(RunStatus::Error).await;
    assert_eq!(state.run_id.as_deref(), Some("R1"));
    assert_eq!(state.error.as_deref(), Some("Audit stream disconnected"));
}

#[tokio::test]
async fn stream_stays_open_until_completion_fetch_settles() {
    let ctx = setup();
    let gate = ctx.api.hold_candidates();
    ctx.api.set_candidates("R1", Ok(vec![candidate_result("CAND1")]));
    ctx.trigger("R1").await;
    ctx.api.push_event("R1", &complete(at(9)));

    ctx.wait_status(RunStatus::Completed).await;
    ctx.until(|api| api.calls().contains(&ApiCall::Candidates { run_id: RunId::new("R1") }))
        .await;
    assert!(ctx.api.stream_open("R1"));

    gate.notify_one();
    let state = ctx.wait(|s| s.candidates.len() == 1).await;
    assert_eq!(state.status, RunStatus::Completed);
    ctx.until(|api| !api.stream_open("R1")).await;
}

#[tokio::test]
async fn completion_fetch_failure_keeps_run_completed() {
    let ctx = setup();
    ctx.api.set_candidates("R1", Err(ApiError::status(500, "")));
    ctx.trigger("R1").await;
    ctx.api.push_event("R1", &hypothesis(Some("C1"), at(1)));
    ctx.api.push_event("R1", &complete(at(9)));

    ctx.wait_status(RunStatus::Completed).await;
    ctx.until(|api| !api.stream_open("R1")).await;

    let state = ctx.handle.snapshot().await.unwrap();
    assert_eq!(state.status, RunStatus::Completed);
    assert_eq!(state.error, None);
    assert!(state.candidates.is_empty());
    assert_eq!(state.cluster("C1").unwrap().status, StepStatus::Completed);
}

#[tokio::test]
async fn backend_closing_after_complete_is_not_an_error() {
    let ctx = setup();
    ctx.trigger("R1").await;
    ctx.api.push_event("R1", &complete(at(9)));
    ctx.api.end_stream("R1");

    ctx.wait_status(RunStatus::Completed).await;
    ctx.until(|api| !api.stream_open("R1")).await;
    let state = ctx.handle.snapshot().await.unwrap();
    assert_eq!(state.status, RunStatus::Completed);
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn events_after_complete_are_ignored() {
    let ctx = setup();
    ctx.trigger("R1").await;
    ctx.api.push_event("R1", &complete(at(9)));
    ctx.api.push_event("R1", &hypothesis(Some("C9"), at(10)));
    ctx.api.end_stream("R1");

    ctx.wait_status(RunStatus::Completed).await;
    ctx.until(|api| !api.stream_open("R1")).await;
    let state = ctx.handle.snapshot().await.unwrap();
    assert!(state.cluster("C9").is_none());
}

#[tokio::test]
async fn malformed_and_unknown_frames_are_skipped() {
    let ctx = setup();
    ctx.trigger("R1").await;
    ctx.api.push_frame("R1", "message", "not json");
    ctx.api.push_frame("R1", "message", "[1, 2]");
    ctx.api.push_frame("R1", "heartbeat", r#"{"type":"heartbeat"}"#);
    ctx.api.push_event("R1", &phase_start(Some("extract"), at(0)));

    let state = ctx.wait(|s| s.active_phase().is_some()).await;
    assert_eq!(state.status, RunStatus::Streaming);
    assert_eq!(state.active_phase().unwrap().name, PhaseName::Extract);
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn frame_without_timestamp_is_stamped_by_the_clock() {
    let ctx = setup();
    ctx.clock.set(at(300));
    ctx.trigger("R1").await;
    ctx.api.push_frame("R1", "phase_start", r#"{"phase":"extract"}"#);

    let state = ctx.wait(|s| s.active_phase().is_some()).await;
    assert_eq!(state.phases[0].started_at, Some(at(300)));
}
