// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rw-adapters: the seam between runwatch and the audit backend

pub mod audit;

pub use audit::{error_message, ApiError, AuditApi, FrameStream, HttpAuditApi, HttpConfig};

#[cfg(any(test, feature = "test-support"))]
pub use audit::{ApiCall, FakeAuditApi};
