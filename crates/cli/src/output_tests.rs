// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use rw_core::test_support::at;
use rw_core::{ClusterStep, PhaseName, RunId, RunStatus, ToolCall};
use yare::parameterized;

fn running() -> RunState {
    let mut state = RunState::new();
    state.run_id = Some(RunId::new("R1"));
    state.status = RunStatus::Streaming;
    state
}

fn cluster(id: &str) -> ClusterStep {
    ClusterStep::builder()
        .cluster_id(id)
        .label(format!("Investigating {id}"))
        .source_type("cross_account,sql_trace".to_string())
        .event_count(12)
        .account_count(3)
        .build()
}

fn tool(label: &str) -> ToolCall {
    ToolCall { tool: "sql_db_query".to_string(), friendly_label: label.to_string(), timestamp: at(0) }
}

#[test]
fn unchanged_state_prints_nothing() {
    let state = running();
    assert!(progress_lines(&state, &state).is_empty());
}

#[test]
fn new_run_id_is_announced() {
    let prev = RunState::new();
    let next = running();
    assert_eq!(progress_lines(&prev, &next), vec!["Run R1".to_string()]);
}

#[test]
fn phase_transitions_are_reported() {
    let prev = running();
    let mut next = prev.clone();
    let extract = &mut next.phases[PhaseName::Extract.index()];
    extract.status = StepStatus::Completed;
    extract.duration = Some(10.0);
    extract.detail = Some("120 units".to_string());
    next.phases[PhaseName::EmbedCluster.index()].status = StepStatus::Active;

    let lines = progress_lines(&prev, &next);

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("✓ "));
    assert!(lines[0].ends_with("(10.0s): 120 units"));
    assert!(lines[1].starts_with("▸ "));
}

#[test]
fn new_cluster_lists_friendly_sources() {
    let prev = running();
    let mut next = prev.clone();
    next.clusters.push(cluster("C1"));

    assert_eq!(
        progress_lines(&prev, &next),
        vec!["  + Investigating C1 (12 events, 3 accounts; Cross-Account Analysis, SQL Trace)"]
    );
}

#[test]
fn only_new_tool_calls_are_printed() {
    let mut prev = running();
    let mut c1 = cluster("C1");
    c1.tool_calls.push(tool("Querying the database..."));
    prev.clusters.push(c1);
    let mut next = prev.clone();
    next.clusters[0].tool_calls.push(tool("Searching the web..."));

    assert_eq!(progress_lines(&prev, &next), vec!["    Searching the web..."]);
}

#[test]
fn pattern_is_reported_once() {
    let mut prev = running();
    prev.clusters.push(cluster("C1"));
    let mut next = prev.clone();
    next.clusters[0].pattern_name = Some("No Trade".to_string());

    assert_eq!(progress_lines(&prev, &next), vec!["  = Investigating C1: No Trade"]);
    assert!(progress_lines(&next, &next).is_empty());
}

#[parameterized(
    critical = { 0.85, "[Critical]" },
    high = { 0.6, "[High]" },
    medium = { 0.45, "[Medium]" },
    low = { 0.1, "[Low]" },
)]
fn candidate_severity_prefix(confidence: f64, prefix: &str) {
    let candidate = CandidateResult::builder().confidence(confidence).build();
    assert!(format_candidate(&candidate).starts_with(prefix));
}

#[test]
fn candidate_block_shows_scores_and_support() {
    let candidate = CandidateResult::builder()
        .title(Some("Rapid withdrawals".to_string()))
        .confidence(0.85)
        .quality_score(0.7)
        .support_events(42)
        .support_accounts(Some(5))
        .build();

    let text = format_candidate(&candidate);

    assert!(text.contains("Rapid withdrawals"));
    assert!(text.contains("confidence 85%: Very strong evidence this is real fraud"));
    assert!(text.contains("quality 70%: Good evidence with corroborating signals"));
    assert!(text.ends_with("support: 42 events, 5 accounts"));
}

#[test]
fn summary_without_candidates_says_so() {
    let state = running();
    let text = format_summary(&state);
    assert_eq!(text.lines().filter(|l| l.starts_with("· ")).count(), 4);
    assert!(text.ends_with("No candidates\n"));
}

#[test]
fn summary_counts_candidates() {
    let mut state = running();
    state.candidates.push(CandidateResult::builder().build());
    assert!(format_summary(&state).contains("1 candidate(s)"));
}
