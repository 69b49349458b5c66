// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Audit backend adapter: REST calls plus the live event stream.

mod http;

#[cfg(any(test, feature = "test-support"))]
mod fake;

pub use http::{HttpAuditApi, HttpConfig};

#[cfg(any(test, feature = "test-support"))]
pub use fake::{ApiCall, FakeAuditApi};

use async_trait::async_trait;
use futures_util::Stream;
use rw_core::{CandidateResult, RunId};
use rw_wire::{RunStatusResponse, SseFrame, TriggerRunRequest, TriggerRunResponse};
use serde_json::Value;
use std::pin::Pin;
use thiserror::Error;

/// Frames from one live stream connection. Dropping it closes the connection.
pub type FrameStream = Pin<Box<dyn Stream<Item = Result<SseFrame, ApiError>> + Send>>;

/// Errors from audit backend calls
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Connection, timeout or body read failure
    #[error("{0}")]
    Transport(String),
    /// Non-2xx response. The body is kept as JSON when it parses, else as a
    /// JSON string holding the raw text.
    #[error("request failed with status code {status}")]
    Status { status: u16, body: Value },
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(status: u16, text: &str) -> Self {
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
        };
        ApiError::Status { status, body }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// The message to show for a failed request.
///
/// A response body that is itself a string wins, then a `detail` or
/// `message` field of an object body, then the error's own text, then
/// `fallback`.
pub fn error_message(err: &ApiError, fallback: &str) -> String {
    if let ApiError::Status { body, .. } = err {
        match body {
            Value::String(s) if !s.is_empty() => return s.clone(),
            Value::Object(map) => {
                for key in ["detail", "message"] {
                    if let Some(Value::String(s)) = map.get(key) {
                        if !s.is_empty() {
                            return s.clone();
                        }
                    }
                }
            }
            _ => {}
        }
    }
    let text = err.to_string();
    if text.is_empty() {
        fallback.to_string()
    } else {
        text
    }
}

/// Async access to the audit backend.
#[async_trait]
pub trait AuditApi: Clone + Send + Sync + 'static {
    /// Start a new run.
    async fn trigger_run(&self, request: TriggerRunRequest) -> Result<TriggerRunResponse, ApiError>;

    async fn run_status(&self, run_id: &RunId) -> Result<RunStatusResponse, ApiError>;

    /// The authoritative candidate listing for a run.
    async fn candidates(&self, run_id: &RunId) -> Result<Vec<CandidateResult>, ApiError>;

    /// Attach to the run's event stream.
    async fn open_stream(&self, run_id: &RunId) -> Result<FrameStream, ApiError>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
