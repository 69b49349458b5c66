// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run-level status as observed by the client.

use serde::{Deserialize, Serialize};

/// idle → streaming → {completed, error}
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    #[default]
    Idle,
    Streaming,
    Completed,
    Error,
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Error)
    }
}

crate::simple_display! {
    RunStatus {
        Idle => "idle",
        Streaming => "streaming",
        Completed => "completed",
        Error => "error",
    }
}

/// Run status as reported by the backend's run endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RemoteRunStatus {
    Pending,
    Running,
    Failed,
    Completed,
    Other(String),
}

impl RemoteRunStatus {
    /// Still producing events, so a live stream can be attached.
    pub fn is_live(&self) -> bool {
        matches!(self, RemoteRunStatus::Pending | RemoteRunStatus::Running)
    }
}

impl From<String> for RemoteRunStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => RemoteRunStatus::Pending,
            "running" => RemoteRunStatus::Running,
            "failed" => RemoteRunStatus::Failed,
            "completed" => RemoteRunStatus::Completed,
            _ => RemoteRunStatus::Other(s),
        }
    }
}

impl From<RemoteRunStatus> for String {
    fn from(status: RemoteRunStatus) -> Self {
        match status {
            RemoteRunStatus::Pending => "pending".to_string(),
            RemoteRunStatus::Running => "running".to_string(),
            RemoteRunStatus::Failed => "failed".to_string(),
            RemoteRunStatus::Completed => "completed".to_string(),
            RemoteRunStatus::Other(s) => s,
        }
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
