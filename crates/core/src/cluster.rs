// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Evidence clusters and the tool calls made while investigating them.

use crate::id::ClusterId;
use crate::phase::StepStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One agent tool invocation recorded against a cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    pub tool: String,
    pub friendly_label: String,
    pub timestamp: DateTime<Utc>,
}

/// A provisional grouping of related evidence under investigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterStep {
    pub cluster_id: ClusterId,
    pub label: String,
    pub status: StepStatus,
    pub event_count: u64,
    pub account_count: u64,
    /// Comma-joined evidence source keys, `"unknown"` when none were given.
    pub source_type: String,
    pub tool_calls: Vec<ToolCall>,
    pub pattern_name: Option<String>,
}

impl ClusterStep {
    pub fn is_active(&self) -> bool {
        self.status == StepStatus::Active
    }

    /// Active → completed. Returns false when already completed.
    pub fn complete(&mut self) -> bool {
        if self.status.is_completed() {
            return false;
        }
        self.status = StepStatus::Completed;
        true
    }
}

crate::builder! {
    pub struct ClusterStepBuilder => ClusterStep {
        into {
            cluster_id: ClusterId = "C1",
            label: String = "test cluster",
            source_type: String = "unknown",
        }
        set {
            status: StepStatus = StepStatus::Active,
            event_count: u64 = 0,
            account_count: u64 = 0,
            tool_calls: Vec<ToolCall> = Vec::new(),
            pattern_name: Option<String> = None,
        }
    }
}

/// Human phrase for a known agent tool.
pub fn friendly_tool_label(tool: &str) -> Option<&'static str> {
    match tool {
        "sql_db_query" => Some("Querying the database..."),
        "tavily_search_results_json" | "fraud_web_search" => {
            Some("Searching for known fraud patterns...")
        }
        "kmeans_cluster" => Some("Re-analyzing cluster structure..."),
        "AgentSynthesisResult" => Some("Compiling findings..."),
        _ => None,
    }
}

#[cfg(test)]
#[path = "cluster_tests.rs"]
mod tests;
