// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-facing fallback messages.

pub const TRIGGER_FAILED: &str = "Failed to start audit run";
pub const LOAD_FAILED: &str = "Failed to load run data";
pub const PAST_RUN_FAILED: &str = "Audit run failed";
pub const UNKNOWN_ERROR: &str = "Unknown error occurred";
pub const DISCONNECTED: &str = "Audit stream disconnected";

/// Detail given to phases of a run loaded after it finished.
pub const LOADED_FROM_PAST_RUN: &str = "Loaded from past run";
