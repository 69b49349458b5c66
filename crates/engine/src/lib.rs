// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rw-engine: the stream session that drives one audit run at a time

mod bridge;
mod error;
mod executor;
mod handle;
mod message;
mod session;

pub use error::SessionError;
pub use handle::SessionHandle;
pub use session::Session;

pub use rw_state::RunState;
