// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rw trigger` / `rw load` against a backend that refuses connections.

use crate::prelude::*;

const UNREACHABLE: &str = "http://127.0.0.1:9";

#[test]
fn load_against_unreachable_backend_exits_with_run_failure() {
    cli()
        .args(&["--api-base", UNREACHABLE, "--timeout-ms", "2000", "load", "R1"])
        .fails()
        .code(1)
        .stdout_has("Run R1: error")
        .stderr_has("Error:");
}

#[test]
fn trigger_against_unreachable_backend_exits_with_run_failure() {
    cli()
        .args(&["--api-base", UNREACHABLE, "--timeout-ms", "2000", "trigger", "--lookback-days", "3"])
        .fails()
        .code(1)
        .stderr_has("Error:");
}

#[test]
fn json_output_carries_the_error_state() {
    let run = cli()
        .args(&["-o", "json", "--api-base", UNREACHABLE, "--timeout-ms", "2000", "load", "R1"])
        .fails()
        .code(1);
    let state: serde_json::Value = serde_json::from_str(&run.stdout()).unwrap();
    assert_eq!(state["status"], "error");
    assert_eq!(state["run_id"], "R1");
    assert!(state["error"].is_string());
}

#[test]
fn api_base_can_come_from_the_environment() {
    cli()
        .env("RW_API_BASE", UNREACHABLE)
        .args(&["--timeout-ms", "2000", "load", "R7"])
        .fails()
        .code(1)
        .stdout_has("Run R7: error");
}

#[test]
fn explicit_missing_config_file_is_reported() {
    cli()
        .env("RW_CONFIG", "/nonexistent/runwatch-specs/config.toml")
        .args(&["load", "R1"])
        .fails()
        .code(1)
        .stderr_has("failed to read config");
}
