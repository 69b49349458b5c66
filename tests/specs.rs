// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

//! Workspace-level behavioral specs for runwatch.

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/cli"]
mod cli {
    mod help;
    mod run;
}

#[path = "specs/session"]
mod session {
    mod recovery;
    mod scenario;
}
