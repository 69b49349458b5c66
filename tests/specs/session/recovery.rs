// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! How a session ends when the run or its stream goes wrong.

use crate::prelude::*;
use rw_adapters::ApiError;

#[tokio::test]
async fn terminal_error_event_is_reported_verbatim() {
    let backend = Backend::start();
    backend.api.trigger_returns("R1");
    backend.api.push_event("R1", &phase_start(Some("extract"), at(0)));
    backend.api.push_event("R1", &error(Some("Warehouse query timed out"), at(5)));

    backend.handle.trigger_run(7).await.unwrap();
    let state = backend.settled().await;

    assert_eq!(state.status, RunStatus::Error);
    assert_eq!(state.error.as_deref(), Some("Warehouse query timed out"));
    assert!(!backend.api.stream_open("R1"));
}

#[tokio::test]
async fn stream_ending_early_is_a_disconnect() {
    let backend = Backend::start();
    backend.api.trigger_returns("R1");
    backend.api.push_event("R1", &phase_start(Some("extract"), at(0)));
    backend.api.end_stream("R1");

    backend.handle.trigger_run(7).await.unwrap();
    let state = backend.settled().await;

    assert_eq!(state.status, RunStatus::Error);
    assert_eq!(state.error.as_deref(), Some("Audit stream disconnected"));
}

#[tokio::test]
async fn rejected_trigger_surfaces_backend_detail() {
    let backend = Backend::start();
    backend
        .api
        .push_trigger(Err(ApiError::status(409, r#"{"detail":"An audit run is already in progress"}"#)));

    backend.handle.trigger_run(7).await.unwrap();
    let state = backend.settled().await;

    assert_eq!(state.status, RunStatus::Error);
    assert_eq!(state.error.as_deref(), Some("An audit run is already in progress"));
    assert_eq!(state.run_id, None);
}

#[tokio::test]
async fn reset_after_failure_returns_to_baseline() {
    let backend = Backend::start();
    backend.api.trigger_returns("R1");
    backend.api.fail_stream("R1", ApiError::Transport("connection reset".to_string()));
    backend.handle.trigger_run(7).await.unwrap();
    backend.settled().await;

    backend.handle.reset().await.unwrap();
    let state = backend.handle.snapshot().await.unwrap();

    assert_eq!(state, rw_engine::RunState::new());
    assert!(!backend.api.stream_open("R1"));
}
