// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reset, stale results and selection

use super::*;

#[tokio::test]
async fn reset_closes_stream_and_returns_to_baseline() {
    let ctx = setup();
    ctx.trigger("R1").await;
    ctx.api.push_event("R1", &hypothesis(Some("C1"), at(1)));
    ctx.wait(|s| !s.clusters.is_empty()).await;

    ctx.handle.reset().await.unwrap();

    assert!(!ctx.api.stream_open("R1"));
    assert_eq!(ctx.handle.snapshot().await.unwrap(), RunState::new());
    let published = ctx.wait_status(RunStatus::Idle).await;
    assert_eq!(published, RunState::new());
}

#[tokio::test]
async fn frames_after_reset_are_not_applied() {
    let ctx = setup();
    ctx.trigger("R1").await;
    ctx.handle.reset().await.unwrap();

    ctx.api.push_event("R1", &hypothesis(Some("C1"), at(1)));
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(ctx.handle.snapshot().await.unwrap(), RunState::new());
}

#[tokio::test]
async fn results_from_abandoned_load_are_discarded() {
    let ctx = setup();
    let gate = ctx.api.hold_candidates();
    ctx.api.set_run_status("R1", Ok(run_status("R1", "completed", None)));
    ctx.api.set_candidates("R1", Ok(vec![candidate_result("CAND1")]));

    ctx.handle.load_past_run("R1").await.unwrap();
    ctx.until(|api| api.calls().contains(&ApiCall::Candidates { run_id: RunId::new("R1") }))
        .await;
    ctx.handle.reset().await.unwrap();
    gate.notify_one();

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(ctx.handle.snapshot().await.unwrap(), RunState::new());
}

#[tokio::test]
async fn selection_follows_cluster_candidate_mapping() {
    let ctx = setup();
    ctx.trigger("R1").await;
    ctx.api.push_event("R1", &hypothesis(Some("C1"), at(1)));
    ctx.api.push_event("R1", &candidate(Some("C1"), Some("CAND1"), None, at(2)));
    ctx.api.push_event("R1", &hypothesis(Some("C2"), at(3)));
    ctx.wait(|s| s.clusters.len() == 2).await;

    ctx.handle.select_cluster("C1").await.unwrap();
    let state = ctx.handle.snapshot().await.unwrap();
    assert_eq!(state.selected_cluster_id.as_deref(), Some("C1"));
    assert_eq!(state.selected_candidate_id.as_deref(), Some("CAND1"));

    ctx.handle.select_cluster("C2").await.unwrap();
    ctx.handle.select_candidate("CAND1").await.unwrap();
    let state = ctx.handle.snapshot().await.unwrap();
    assert_eq!(state.selected_cluster_id.as_deref(), Some("C1"));
}

#[tokio::test]
async fn cloned_handle_keeps_session_alive() {
    let handle = {
        let ctx = setup();
        ctx.handle.clone()
    };
    assert_eq!(handle.snapshot().await.unwrap(), RunState::new());
}

#[tokio::test]
async fn dropping_every_handle_closes_the_live_stream() {
    let ctx = setup();
    ctx.trigger("R1").await;
    ctx.api.push_event("R1", &phase_start(Some("extract"), at(0)));
    ctx.wait(|s| s.active_phase().is_some()).await;

    let TestContext { api, handle, .. } = ctx;
    drop(handle);

    let closed = async {
        while api.stream_open("R1") {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    };
    tokio::time::timeout(WAIT, closed).await.expect("stream still open after handles dropped");
}
