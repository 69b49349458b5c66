// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! reqwest implementation of [`AuditApi`].

use super::{ApiError, AuditApi, FrameStream};
use async_trait::async_trait;
use futures_util::{Stream, StreamExt};
use reqwest::header::ACCEPT;
use rw_core::{CandidateResult, RunId};
use rw_wire::{
    CandidateListResponse, RunStatusResponse, SseDecoder, SseFrame, TriggerRunRequest,
    TriggerRunResponse,
};
use serde::de::DeserializeOwned;
use std::collections::VecDeque;
use std::pin::Pin;
use std::time::Duration;

const AUDITS_PATH: &str = "/api/background-audits";

/// Connection settings for the audit backend.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Scheme, host and optional prefix, e.g. `http://localhost:8000`.
    pub api_base: String,
    /// Applies to each REST call and to connecting the event stream. An
    /// attached stream stays open as long as the backend keeps it open.
    pub timeout: Duration,
}

impl HttpConfig {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self { api_base: api_base.into(), timeout: Duration::from_secs(30) }
    }

    rw_core::setters! {
        set { timeout: Duration }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.api_base.trim_end_matches('/'), AUDITS_PATH, path)
    }
}

#[derive(Clone)]
pub struct HttpAuditApi {
    client: reqwest::Client,
    config: HttpConfig,
}

impl HttpAuditApi {
    pub fn new(config: HttpConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.config.url(path);
        tracing::debug!(%url, "GET");
        let response = self.client.get(&url).timeout(self.config.timeout).send().await?;
        let response = check_status(response).await?;
        response.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl AuditApi for HttpAuditApi {
    async fn trigger_run(&self, request: TriggerRunRequest) -> Result<TriggerRunResponse, ApiError> {
        let url = self.config.url("/trigger");
        tracing::debug!(%url, lookback_days = request.lookback_days, "POST");
        let response =
            self.client.post(&url).timeout(self.config.timeout).json(&request).send().await?;
        let response = check_status(response).await?;
        response.json().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn run_status(&self, run_id: &RunId) -> Result<RunStatusResponse, ApiError> {
        self.get_json(&format!("/runs/{run_id}")).await
    }

    async fn candidates(&self, run_id: &RunId) -> Result<Vec<CandidateResult>, ApiError> {
        let listing: CandidateListResponse =
            self.get_json(&format!("/runs/{run_id}/candidates")).await?;
        Ok(listing.candidates)
    }

    async fn open_stream(&self, run_id: &RunId) -> Result<FrameStream, ApiError> {
        let url = self.config.url(&format!("/runs/{run_id}/stream"));
        tracing::debug!(%url, "GET (event stream)");
        let response = self.client.get(&url).header(ACCEPT, "text/event-stream").send().await?;
        let response = check_status(response).await?;
        Ok(Box::pin(sse_frames(response.bytes_stream())))
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    tracing::debug!(status = status.as_u16(), "backend returned an error status");
    Err(ApiError::status(status.as_u16(), &text))
}

struct FrameState<S> {
    inner: Pin<Box<S>>,
    decoder: SseDecoder,
    pending: VecDeque<SseFrame>,
    failed: bool,
}

/// Decode a chunked byte stream into SSE frames.
///
/// A read error is yielded once and ends the stream.
pub(crate) fn sse_frames<S, B, E>(bytes: S) -> impl Stream<Item = Result<SseFrame, ApiError>> + Send
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send,
    E: Into<ApiError> + Send,
{
    let state = FrameState {
        inner: Box::pin(bytes),
        decoder: SseDecoder::new(),
        pending: VecDeque::new(),
        failed: false,
    };

    futures_util::stream::unfold(state, |mut state| async move {
        loop {
            if let Some(frame) = state.pending.pop_front() {
                return Some((Ok(frame), state));
            }
            if state.failed {
                return None;
            }
            match state.inner.next().await {
                Some(Ok(chunk)) => {
                    let frames = state.decoder.feed(chunk.as_ref());
                    state.pending.extend(frames);
                }
                Some(Err(e)) => {
                    state.failed = true;
                    return Some((Err(e.into()), state));
                }
                None => return None,
            }
        }
    })
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
