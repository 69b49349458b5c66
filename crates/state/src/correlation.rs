// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cluster ↔ candidate mapping and the paired selection it drives.

use crate::RunState;
use rw_core::{CandidateId, ClusterId};

pub(crate) fn record(state: &mut RunState, cluster: ClusterId, candidate: CandidateId) {
    state.cluster_candidates.insert(cluster, candidate);
}

pub(crate) fn select_cluster(state: &mut RunState, id: ClusterId) {
    if let Some(candidate) = state.cluster_candidates.get(&id) {
        state.selected_candidate_id = Some(candidate.clone());
    }
    state.selected_cluster_id = Some(id);
}

/// Selecting a candidate also selects the first cluster mapped to it.
pub(crate) fn select_candidate(state: &mut RunState, id: CandidateId) {
    let cluster = state
        .cluster_candidates
        .iter()
        .find(|(_, candidate)| **candidate == id)
        .map(|(cluster, _)| cluster.clone());
    if let Some(cluster) = cluster {
        state.selected_cluster_id = Some(cluster);
    }
    state.selected_candidate_id = Some(id);
}

#[cfg(test)]
#[path = "correlation_tests.rs"]
mod tests;
