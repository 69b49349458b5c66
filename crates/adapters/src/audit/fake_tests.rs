// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use futures_util::StreamExt;
use rw_core::test_support::{at, phase_start};
use rw_wire::RunMode;

#[tokio::test]
async fn trigger_results_are_consumed_in_order() {
    let api = FakeAuditApi::new();
    api.trigger_returns("R1");
    api.push_trigger(Err(ApiError::Transport("down".into())));

    let first = api.trigger_run(TriggerRunRequest::full(7)).await.unwrap();
    assert_eq!(first.run_id, "R1");
    assert!(api.trigger_run(TriggerRunRequest::full(7)).await.is_err());
    assert!(api.trigger_run(TriggerRunRequest::full(7)).await.is_err());

    let request = TriggerRunRequest::full(3);
    assert_eq!(request.run_mode, RunMode::Full);
    api.trigger_run(request).await.ok();
    assert_eq!(api.calls().last(), Some(&ApiCall::TriggerRun { lookback_days: 3 }));
}

#[tokio::test]
async fn unknown_run_status_is_not_found() {
    let api = FakeAuditApi::new();
    let err = api.run_status(&RunId::new("R9")).await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 404, .. }));
}

#[tokio::test]
async fn frames_pushed_before_open_are_delivered() {
    let api = FakeAuditApi::new();
    api.push_event("R1", &phase_start(Some("extract"), at(0)));
    let mut stream = api.open_stream(&RunId::new("R1")).await.unwrap();
    assert!(api.stream_open("R1"));

    let frame = stream.next().await.unwrap().unwrap();
    assert_eq!(frame.event, "phase_start");
    assert!(frame.data.contains("\"extract\""));

    api.end_stream("R1");
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn dropping_the_stream_closes_it() {
    let api = FakeAuditApi::new();
    let stream = api.open_stream(&RunId::new("R1")).await.unwrap();
    assert!(api.stream_open("R1"));
    drop(stream);
    assert!(!api.stream_open("R1"));
}

#[tokio::test]
async fn reopening_replaces_the_channel() {
    let api = FakeAuditApi::new();
    let first = api.open_stream(&RunId::new("R1")).await.unwrap();
    let mut second = api.open_stream(&RunId::new("R1")).await.unwrap();
    drop(first);
    assert!(api.stream_open("R1"));

    api.push_frame("R1", "complete", "{}");
    assert_eq!(second.next().await.unwrap().unwrap().event, "complete");
}

#[tokio::test]
async fn scripted_open_failure_applies_once() {
    let api = FakeAuditApi::new();
    api.fail_open("R1", ApiError::status(503, ""));
    assert!(api.open_stream(&RunId::new("R1")).await.is_err());
    assert!(api.open_stream(&RunId::new("R1")).await.is_ok());
}

#[tokio::test]
async fn held_candidates_wait_for_release() {
    let api = FakeAuditApi::new();
    api.set_candidates("R1", Ok(vec![CandidateResult::builder().build()]));
    let gate = api.hold_candidates();

    let task = tokio::spawn({
        let api = api.clone();
        async move { api.candidates(&RunId::new("R1")).await }
    });
    tokio::task::yield_now().await;
    assert!(!task.is_finished());

    gate.notify_one();
    let listed = task.await.unwrap().unwrap();
    assert_eq!(listed.len(), 1);
}
