// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A triggered run reconstructed end to end from its event stream.

use crate::prelude::*;
use rw_adapters::ApiCall;
use rw_core::{CandidateResult, RunId};
use similar_asserts::assert_eq;

fn script_no_trade_run(backend: &Backend) {
    backend.api.trigger_returns("R1");
    backend.api.set_candidates(
        "R1",
        Ok(vec![CandidateResult::builder()
            .candidate_id("CAND1")
            .title(Some("No Trade".to_string()))
            .confidence(0.82)
            .build()]),
    );

    let mut hyp = hypothesis(Some("C1"), at(20));
    hyp.title = "Accounts withdrawing without trading".to_string();
    hyp.metadata.insert("event_count", 14u64);
    hyp.metadata.insert("account_count", 4u64);
    hyp.metadata.insert("source_types", vec!["cross_account", "sql_trace"]);

    for event in [
        phase_start(Some("extract"), at(0)),
        progress(Some("extract"), Some("120 units"), at(10)),
        phase_start(Some("embed_cluster"), at(10)),
        progress(Some("embed_cluster"), None, at(18)),
        hyp,
        agent_tool("sql_db_query", at(22)),
        agent_tool("web_search", at(25)),
        candidate(Some("C1"), Some("CAND1"), Some("No Trade"), at(30)),
        complete(at(40)),
    ] {
        backend.api.push_event("R1", &event);
    }
}

#[tokio::test]
async fn no_trade_run_is_reconstructed() {
    let backend = Backend::start();
    script_no_trade_run(&backend);

    backend.handle.trigger_run(14).await.unwrap();
    let state = backend.settled().await;

    assert_eq!(state.status, RunStatus::Completed);
    assert_eq!(state.run_id, Some(RunId::new("R1")));
    assert_eq!(state.error, None);
    assert_eq!(
        phase_table(&state),
        vec![
            (PhaseName::Extract, StepStatus::Completed, Some(10.0)),
            (PhaseName::EmbedCluster, StepStatus::Completed, Some(8.0)),
            (PhaseName::Investigate, StepStatus::Completed, Some(20.0)),
            (PhaseName::Artifacts, StepStatus::Completed, None),
        ]
    );

    assert_eq!(state.clusters.len(), 1);
    let cluster = &state.clusters[0];
    assert_eq!(cluster.cluster_id.as_str(), "C1");
    assert_eq!(cluster.label, "Accounts withdrawing without trading");
    assert_eq!(cluster.status, StepStatus::Completed);
    assert_eq!((cluster.event_count, cluster.account_count), (14, 4));
    assert_eq!(cluster.source_type, "cross_account,sql_trace");
    assert_eq!(cluster.pattern_name.as_deref(), Some("No Trade"));
    assert_eq!(cluster.tool_calls.len(), 2);

    assert_eq!(state.candidates.len(), 1);
    assert_eq!(state.candidates[0].display_title(), "No Trade");

    assert_eq!(
        backend.api.calls(),
        vec![
            ApiCall::TriggerRun { lookback_days: 14 },
            ApiCall::OpenStream { run_id: RunId::new("R1") },
            ApiCall::Candidates { run_id: RunId::new("R1") },
        ]
    );
    assert!(!backend.api.stream_open("R1"));
}

#[tokio::test]
async fn selections_follow_the_cluster_candidate_mapping() {
    let backend = Backend::start();
    script_no_trade_run(&backend);
    backend.handle.trigger_run(7).await.unwrap();
    backend.settled().await;

    backend.handle.select_cluster("C1").await.unwrap();
    let state = backend.handle.snapshot().await.unwrap();
    assert_eq!(state.selected_cluster_id.as_ref().map(|id| id.as_str()), Some("C1"));
    assert_eq!(state.selected_candidate_id.as_ref().map(|id| id.as_str()), Some("CAND1"));

    backend.handle.reset().await.unwrap();
    backend.handle.select_candidate("CAND1").await.unwrap();
    let state = backend.handle.snapshot().await.unwrap();
    assert_eq!(state.selected_candidate_id.as_ref().map(|id| id.as_str()), Some("CAND1"));
    assert_eq!(state.selected_cluster_id, None);
}

#[tokio::test]
async fn past_run_loads_without_a_stream() {
    let backend = Backend::start();
    backend.api.set_run_status(
        "R9",
        Ok(rw_wire::RunStatusResponse {
            run_id: RunId::new("R9"),
            status: "completed".to_string().into(),
            error_message: None,
        }),
    );
    backend
        .api
        .set_candidates("R9", Ok(vec![CandidateResult::builder().candidate_id("CAND9").build()]));

    backend.handle.load_past_run("R9").await.unwrap();
    let state = backend.settled().await;

    assert_eq!(state.status, RunStatus::Completed);
    assert!(state.phases.iter().all(|p| p.status == StepStatus::Completed && p.duration == Some(0.0)));
    assert_eq!(state.candidates[0].candidate_id.as_str(), "CAND9");
    assert!(!backend.api.calls().iter().any(|c| matches!(c, ApiCall::OpenStream { .. })));
}

#[tokio::test]
async fn run_without_embed_events_backfills_clustering() {
    let backend = Backend::start();
    backend.api.trigger_returns("R1");
    backend.api.set_candidates("R1", Ok(vec![CandidateResult::builder().candidate_id("CAND1").build()]));

    let mut hyp = hypothesis(Some("C1"), at(5));
    hyp.metadata.insert("event_count", 5u64);
    hyp.metadata.insert("source_types", vec!["sql_trace"]);
    for event in [
        phase_start(Some("extract"), at(0)),
        progress(Some("extract"), Some("12 events found"), at(5)),
        hyp,
        agent_tool("sql_db_query", at(7)),
        candidate(Some("C1"), Some("CAND1"), Some("No Trade"), at(9)),
        complete(at(12)),
    ] {
        backend.api.push_event("R1", &event);
    }

    backend.handle.trigger_run(7).await.unwrap();
    let state = backend.settled().await;

    assert_eq!(state.status, RunStatus::Completed);
    let extract = state.phase(PhaseName::Extract).unwrap();
    assert_eq!(extract.status, StepStatus::Completed);
    assert_eq!(extract.detail.as_deref(), Some("12 events found"));
    assert_eq!(extract.duration, Some(5.0));
    let embed = state.phase(PhaseName::EmbedCluster).unwrap();
    assert_eq!(embed.status, StepStatus::Completed);
    assert_eq!(embed.detail.as_deref(), Some("Clustering complete"));
    assert_eq!(embed.duration, None);

    let cluster = state.cluster("C1").unwrap();
    assert_eq!(cluster.status, StepStatus::Completed);
    assert_eq!(cluster.pattern_name.as_deref(), Some("No Trade"));
    assert_eq!(cluster.source_type, "sql_trace");
    assert_eq!(cluster.event_count, 5);
    assert_eq!(cluster.tool_calls[0].friendly_label, "Querying the database...");

    let mapping: Vec<(&str, &str)> =
        state.cluster_candidates.iter().map(|(c, k)| (c.as_str(), k.as_str())).collect();
    assert_eq!(mapping, vec![("C1", "CAND1")]);
    assert_eq!(state.candidates.len(), 1);
    assert!(!backend.api.stream_open("R1"));

    backend.handle.select_candidate("CAND1").await.unwrap();
    let state = backend.handle.snapshot().await.unwrap();
    assert_eq!(state.selected_candidate_id.as_ref().map(|id| id.as_str()), Some("CAND1"));
    assert_eq!(state.selected_cluster_id.as_ref().map(|id| id.as_str()), Some("C1"));
}
