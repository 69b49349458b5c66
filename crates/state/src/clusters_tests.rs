// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use rw_core::test_support::{agent_tool, at, candidate, hypothesis};
use rw_core::{EventKind, PhaseName};
use serde_json::json;
use yare::parameterized;

fn active_ids(state: &RunState) -> Vec<&str> {
    state.clusters.iter().filter(|c| c.is_active()).map(|c| c.cluster_id.as_str()).collect()
}

#[test]
fn hypothesis_without_phase_events_starts_investigation() {
    let mut state = RunState::new();
    on_hypothesis(&mut state, &hypothesis(Some("C1"), at(1)));

    let investigate = state.phase(PhaseName::Investigate).unwrap();
    assert_eq!(investigate.status, StepStatus::Active);
    assert_eq!(state.clusters.len(), 1);
    assert_eq!(state.active_cluster.as_deref(), Some("C1"));
    assert_eq!(state.selected_cluster_id.as_deref(), Some("C1"));
}

#[test]
fn hypothesis_reads_counts_and_sources_from_metadata() {
    let mut event = hypothesis(Some("C1"), at(1));
    event.title = "Investigating C1".to_string();
    event.metadata.insert("unit_count", 42);
    event.metadata.insert("account_count", "7");
    event.metadata.insert("sources", json!(["triage", "sql_trace"]));

    let mut state = RunState::new();
    on_hypothesis(&mut state, &event);

    let cluster = state.cluster("C1").unwrap();
    assert_eq!(cluster.label, "Investigating C1");
    assert_eq!(cluster.event_count, 42);
    assert_eq!(cluster.account_count, 7);
    assert_eq!(cluster.source_type, "triage,sql_trace");
    assert_eq!(cluster.pattern_name, None);
}

#[test]
fn hypothesis_without_sources_is_unknown() {
    let mut state = RunState::new();
    on_hypothesis(&mut state, &hypothesis(Some("C1"), at(1)));
    assert_eq!(state.cluster("C1").unwrap().source_type, "unknown");
}

#[test]
fn numeric_zero_is_a_valid_cluster_id() {
    let mut event = hypothesis(None, at(1));
    event.metadata.insert("cluster_id", 0);
    let mut state = RunState::new();
    on_hypothesis(&mut state, &event);
    assert_eq!(state.clusters[0].cluster_id, "0");
}

#[test]
fn fallback_ids_never_collide() {
    let mut state = RunState::new();
    on_hypothesis(&mut state, &hypothesis(Some("1"), at(1)));
    on_hypothesis(&mut state, &hypothesis(None, at(2)));
    on_hypothesis(&mut state, &hypothesis(None, at(3)));

    let ids: Vec<&str> = state.clusters.iter().map(|c| c.cluster_id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[test]
fn new_hypothesis_completes_previous_cluster() {
    let mut state = RunState::new();
    on_hypothesis(&mut state, &hypothesis(Some("C1"), at(1)));
    on_hypothesis(&mut state, &hypothesis(Some("C2"), at(2)));

    assert_eq!(state.cluster("C1").unwrap().status, StepStatus::Completed);
    assert_eq!(active_ids(&state), vec!["C2"]);
    assert_eq!(state.selected_cluster_id.as_deref(), Some("C2"));
}

#[test]
fn redelivered_hypothesis_does_not_duplicate() {
    let mut state = RunState::new();
    on_hypothesis(&mut state, &hypothesis(Some("C1"), at(1)));
    on_hypothesis(&mut state, &hypothesis(Some("C2"), at(2)));
    on_hypothesis(&mut state, &hypothesis(Some("C1"), at(3)));

    assert_eq!(state.clusters.len(), 2);
    assert_eq!(state.cluster("C1").unwrap().status, StepStatus::Completed);
    assert_eq!(active_ids(&state), vec!["C2"]);
    assert_eq!(state.selected_cluster_id.as_deref(), Some("C1"));
}

#[parameterized(
    sql = { "sql_db_query", "Querying the database..." },
    tavily = { "tavily_search_results_json", "Searching for known fraud patterns..." },
    web = { "fraud_web_search", "Searching for known fraud patterns..." },
    kmeans = { "kmeans_cluster", "Re-analyzing cluster structure..." },
    synthesis = { "AgentSynthesisResult", "Compiling findings..." },
    other = { "geo_lookup", "Calling geo_lookup" },
)]
fn tool_call_gets_friendly_label(tool: &str, label: &str) {
    let mut state = RunState::new();
    on_hypothesis(&mut state, &hypothesis(Some("C1"), at(1)));
    on_agent_tool(&mut state, &agent_tool(tool, at(2)));

    let calls = &state.cluster("C1").unwrap().tool_calls;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].tool, tool);
    assert_eq!(calls[0].friendly_label, label);
    assert_eq!(calls[0].timestamp, at(2));
}

#[test]
fn tool_name_falls_back_to_tool_then_title() {
    let mut state = RunState::new();
    on_hypothesis(&mut state, &hypothesis(Some("C1"), at(1)));

    let mut by_tool = AuditEvent::new(EventKind::AgentTool, at(2));
    by_tool.metadata.insert("tool", "sql_db_query");
    on_agent_tool(&mut state, &by_tool);

    let mut by_title = AuditEvent::new(EventKind::AgentTool, at(3));
    by_title.title = "Thinking".to_string();
    on_agent_tool(&mut state, &by_title);

    let calls = &state.cluster("C1").unwrap().tool_calls;
    assert_eq!(calls[0].tool, "sql_db_query");
    assert_eq!(calls[0].friendly_label, "Querying the database...");
    assert_eq!(calls[1].tool, "Thinking");
    assert_eq!(calls[1].friendly_label, "Thinking");
}

#[test]
fn tool_call_without_active_cluster_is_dropped() {
    let mut state = RunState::new();
    on_agent_tool(&mut state, &agent_tool("sql_db_query", at(2)));
    assert!(state.clusters.is_empty());
    assert_eq!(state.phase(PhaseName::Investigate).unwrap().status, StepStatus::Active);
}

#[test]
fn candidate_completes_cluster_and_records_mapping() {
    let mut state = RunState::new();
    on_hypothesis(&mut state, &hypothesis(Some("C1"), at(1)));

    let mut event = candidate(Some("C1"), Some("CAND1"), Some("No Trade"), at(5));
    event.metadata.insert("event_count", 12);
    on_candidate(&mut state, &event);

    let cluster = state.cluster("C1").unwrap();
    assert_eq!(cluster.status, StepStatus::Completed);
    assert_eq!(cluster.pattern_name.as_deref(), Some("No Trade"));
    assert_eq!(cluster.event_count, 12);
    assert_eq!(state.active_cluster, None);
    assert_eq!(state.cluster_candidates.get("C1").map(|c| c.as_str()), Some("CAND1"));
}

#[test]
fn candidate_without_pattern_keeps_existing_name() {
    let mut state = RunState::new();
    on_hypothesis(&mut state, &hypothesis(Some("C1"), at(1)));
    on_candidate(&mut state, &candidate(Some("C1"), Some("CAND1"), Some("No Trade"), at(2)));
    on_candidate(&mut state, &candidate(Some("C1"), Some("CAND1"), None, at(3)));
    assert_eq!(state.cluster("C1").unwrap().pattern_name.as_deref(), Some("No Trade"));
}

#[test]
fn candidate_for_other_cluster_leaves_active_cluster() {
    let mut state = RunState::new();
    on_hypothesis(&mut state, &hypothesis(Some("C1"), at(1)));
    on_hypothesis(&mut state, &hypothesis(Some("C2"), at(2)));
    on_candidate(&mut state, &candidate(Some("C1"), Some("CAND1"), None, at(3)));
    assert_eq!(state.active_cluster.as_deref(), Some("C2"));
}

#[test]
fn candidate_without_candidate_id_records_nothing() {
    let mut state = RunState::new();
    on_hypothesis(&mut state, &hypothesis(Some("C1"), at(1)));
    on_candidate(&mut state, &candidate(Some("C1"), None, None, at(2)));
    assert!(state.cluster_candidates.is_empty());
    assert_eq!(state.cluster("C1").unwrap().status, StepStatus::Completed);
}

#[test]
fn complete_all_clears_active_cluster() {
    let mut state = RunState::new();
    on_hypothesis(&mut state, &hypothesis(Some("C1"), at(1)));
    complete_all(&mut state);
    assert!(active_ids(&state).is_empty());
    assert_eq!(state.active_cluster, None);
}
