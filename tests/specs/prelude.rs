// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for specs: a fluent wrapper around the `rw` binary and
//! a session wired to the scripted backend.

#![allow(dead_code)]

use std::process::Output;
use std::time::Duration;

use rw_adapters::FakeAuditApi;
use rw_core::FakeClock;
use rw_engine::{RunState, Session, SessionHandle};

pub use rw_core::test_support::*;
pub use rw_core::{PhaseName, RunStatus, StepStatus};

/// Upper bound for anything a spec waits on.
pub const SETTLE: Duration = Duration::from_secs(5);

/// `rw` with a clean environment: no RW_* overrides and no user config.
pub fn cli() -> CliBuilder {
    let mut cmd = assert_cmd::Command::cargo_bin("rw").expect("rw binary");
    for key in ["RW_API_BASE", "RW_TIMEOUT_MS", "RW_LOOKBACK_DAYS", "RW_CONFIG", "RW_LOG"] {
        cmd.env_remove(key);
    }
    cmd.env("XDG_CONFIG_HOME", "/nonexistent/runwatch-specs").env("NO_COLOR", "1");
    cmd.timeout(Duration::from_secs(30));
    CliBuilder { cmd }
}

pub struct CliBuilder {
    cmd: assert_cmd::Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Run and require exit code 0.
    pub fn passes(mut self) -> RunAssert {
        let output = self.cmd.output().expect("spawn rw");
        let run = RunAssert { output };
        assert!(run.output.status.success(), "expected success\n{}", run.describe());
        run
    }

    /// Run and require a non-zero exit.
    pub fn fails(mut self) -> RunAssert {
        let output = self.cmd.output().expect("spawn rw");
        let run = RunAssert { output };
        assert!(!run.output.status.success(), "expected failure\n{}", run.describe());
        run
    }
}

pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout().contains(needle), "stdout missing {needle:?}\n{}", self.describe());
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr().contains(needle), "stderr missing {needle:?}\n{}", self.describe());
        self
    }

    pub fn code(self, expected: i32) -> Self {
        assert_eq!(self.output.status.code(), Some(expected), "{}", self.describe());
        self
    }

    fn describe(&self) -> String {
        format!("status: {:?}\nstdout:\n{}\nstderr:\n{}", self.output.status, self.stdout(), self.stderr())
    }
}

/// A session over the scripted backend, with a pinned clock.
pub struct Backend {
    pub api: FakeAuditApi,
    pub clock: FakeClock,
    pub handle: SessionHandle,
}

impl Backend {
    pub fn start() -> Self {
        let api = FakeAuditApi::default();
        let clock = FakeClock::new();
        let handle = Session::spawn(api.clone(), clock.clone());
        Self { api, clock, handle }
    }

    pub async fn settled(&self) -> RunState {
        tokio::time::timeout(SETTLE, self.handle.wait_settled())
            .await
            .expect("session did not settle")
            .expect("session closed")
    }
}

/// `(phase, status, duration)` for each phase, in order.
pub fn phase_table(state: &RunState) -> Vec<(PhaseName, StepStatus, Option<f64>)> {
    state.phases.iter().map(|p| (p.name, p.status, p.duration)).collect()
}
