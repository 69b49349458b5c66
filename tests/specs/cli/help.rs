// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output specs

use crate::prelude::*;

#[test]
fn rw_help_lists_commands() {
    cli().args(&["--help"]).passes().stdout_has("Usage:").stdout_has("trigger").stdout_has("load");
}

#[test]
fn rw_trigger_help_shows_lookback_flag() {
    cli().args(&["trigger", "--help"]).passes().stdout_has("--lookback-days");
}

#[test]
fn rw_load_help_shows_run_id() {
    cli().args(&["load", "--help"]).passes().stdout_has("RUN_ID");
}

#[test]
fn rw_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}

#[test]
fn rw_without_command_fails_with_usage() {
    cli().fails().code(2).stderr_has("Usage:");
}

#[test]
fn rw_rejects_unknown_output_format() {
    cli().args(&["-o", "yaml", "load", "R1"]).fails().code(2);
}
