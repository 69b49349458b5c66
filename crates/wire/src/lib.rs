// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire formats spoken by the background audit backend.
//!
//! - `sse`: `text/event-stream` framing
//! - `normalize`: frame payload → canonical [`rw_core::AuditEvent`]
//! - `api`: REST request and response bodies

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod api;
mod normalize;
mod sse;

pub use api::{
    CandidateListResponse, RunMode, RunStatusResponse, TriggerRunRequest, TriggerRunResponse,
};
pub use normalize::normalize;
pub use sse::{SseDecoder, SseFrame, DEFAULT_EVENT_TYPE};
