// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cluster registry: hypotheses open clusters, tool calls attach to the
//! active one, candidates close them.

use crate::{correlation, phases, RunState};
use rw_core::{
    friendly_tool_label, AuditEvent, CandidateId, ClusterId, ClusterStep, Metadata, StepStatus,
    ToolCall,
};

const UNKNOWN_SOURCE: &str = "unknown";

/// The cluster count, bumped until it names no existing cluster.
fn fallback_id(clusters: &[ClusterStep]) -> ClusterId {
    let mut n = clusters.len();
    loop {
        let candidate = n.to_string();
        if !clusters.iter().any(|c| c.cluster_id == *candidate.as_str()) {
            return ClusterId::new(candidate);
        }
        n += 1;
    }
}

fn event_count(meta: &Metadata) -> Option<u64> {
    meta.count("event_count").or_else(|| meta.count("unit_count"))
}

fn source_type(meta: &Metadata) -> String {
    meta.list("source_types")
        .filter(|l| !l.is_empty())
        .or_else(|| meta.list("sources").filter(|l| !l.is_empty()))
        .map(|l| l.join(","))
        .unwrap_or_else(|| UNKNOWN_SOURCE.to_string())
}

/// Complete whatever cluster is active and make `id` the active one.
fn activate(state: &mut RunState, id: &ClusterId) {
    for cluster in state.clusters.iter_mut().filter(|c| c.cluster_id != *id) {
        cluster.complete();
    }
    if let Some(cluster) = state.clusters.iter_mut().find(|c| c.cluster_id == *id) {
        cluster.status = StepStatus::Active;
    }
    state.active_cluster = Some(id.clone());
}

pub(crate) fn on_hypothesis(state: &mut RunState, event: &AuditEvent) {
    phases::ensure_investigate_active(&mut state.phases, event.timestamp);
    let meta = &event.metadata;

    if let Some(id) = meta.str("cluster_id").map(ClusterId::from) {
        if let Some(existing) = state.cluster(&id) {
            tracing::debug!(cluster = %id, "hypothesis redelivered");
            if !existing.status.is_completed() {
                activate(state, &id);
            }
            state.selected_cluster_id = Some(id);
            return;
        }
    }

    let id = meta
        .str("cluster_id")
        .map(ClusterId::from)
        .unwrap_or_else(|| fallback_id(&state.clusters));
    state.clusters.push(ClusterStep {
        cluster_id: id.clone(),
        label: event.title.clone(),
        status: StepStatus::Pending,
        event_count: event_count(meta).unwrap_or(0),
        account_count: meta.count("account_count").unwrap_or(0),
        source_type: source_type(meta),
        tool_calls: Vec::new(),
        pattern_name: None,
    });
    activate(state, &id);
    state.selected_cluster_id = Some(id);
}

pub(crate) fn on_agent_tool(state: &mut RunState, event: &AuditEvent) {
    phases::ensure_investigate_active(&mut state.phases, event.timestamp);

    let Some(active) = state.active_cluster.clone() else {
        tracing::debug!(title = %event.title, "dropping tool call with no active cluster");
        return;
    };
    let Some(cluster) = state.clusters.iter_mut().find(|c| c.cluster_id == active) else {
        return;
    };
    let meta = &event.metadata;
    let tool = meta
        .str("tool_name")
        .or_else(|| meta.str("tool"))
        .unwrap_or_else(|| event.title.clone());
    let friendly_label = friendly_tool_label(&tool)
        .map(str::to_string)
        .unwrap_or_else(|| event.title.clone());
    cluster.tool_calls.push(ToolCall { tool, friendly_label, timestamp: event.timestamp });
}

pub(crate) fn on_candidate(state: &mut RunState, event: &AuditEvent) {
    phases::ensure_investigate_active(&mut state.phases, event.timestamp);
    let meta = &event.metadata;
    let cluster_id = meta.str("cluster_id").map(ClusterId::from);
    let candidate_id = meta.str("candidate_id").map(CandidateId::from);

    if let Some(id) = &cluster_id {
        if let Some(cluster) = state.clusters.iter_mut().find(|c| c.cluster_id == *id) {
            cluster.complete();
            if let Some(name) = meta.str("pattern_name") {
                cluster.pattern_name = Some(name);
            }
            if let Some(n) = event_count(meta) {
                cluster.event_count = n;
            }
            if let Some(n) = meta.count("account_count") {
                cluster.account_count = n;
            }
        } else {
            tracing::debug!(cluster = %id, "candidate names an unseen cluster");
        }
    }

    if let (Some(cluster), Some(candidate)) = (&cluster_id, candidate_id) {
        correlation::record(state, cluster.clone(), candidate);
    }
    if cluster_id.is_some() && state.active_cluster == cluster_id {
        state.active_cluster = None;
    }
}

pub(crate) fn complete_all(state: &mut RunState) {
    for cluster in state.clusters.iter_mut() {
        cluster.complete();
    }
    state.active_cluster = None;
}

#[cfg(test)]
#[path = "clusters_tests.rs"]
mod tests;
