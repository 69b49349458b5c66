// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rw-state: the run view reconstructed from audit stream events

mod clusters;
mod correlation;
pub mod messages;
mod phases;
mod run_state;

pub use run_state::RunState;
