// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session actor tests against the fake backend

mod load;
mod reset;
mod stream;
mod trigger;

use super::*;
use crate::SessionHandle;
use rw_adapters::{ApiCall, ApiError, FakeAuditApi};
use rw_core::test_support::{
    agent_tool, at, candidate, complete, error, hypothesis, phase_start, progress,
};
use rw_core::{CandidateResult, FakeClock, PhaseName, RunId, RunStatus, StepStatus};
use rw_wire::RunStatusResponse;
use std::time::Duration;

const WAIT: Duration = Duration::from_secs(5);

struct TestContext {
    api: FakeAuditApi,
    clock: FakeClock,
    handle: SessionHandle,
}

fn setup() -> TestContext {
    let api = FakeAuditApi::new();
    let clock = FakeClock::new();
    let handle = Session::spawn(api.clone(), clock.clone());
    TestContext { api, clock, handle }
}

impl TestContext {
    /// Wait until the published state satisfies `predicate`.
    async fn wait(&self, predicate: impl FnMut(&RunState) -> bool) -> RunState {
        tokio::time::timeout(WAIT, self.handle.wait_for(predicate))
            .await
            .expect("timed out waiting for run state")
            .expect("session closed")
    }

    async fn wait_status(&self, status: RunStatus) -> RunState {
        self.wait(|s| s.status == status).await
    }

    /// Trigger a run that the fake backend starts as `run_id`, and wait for
    /// its stream to be attached.
    async fn trigger(&self, run_id: &str) {
        self.api.trigger_returns(run_id);
        self.handle.trigger_run(7).await.unwrap();
        self.until(|api| api.stream_open(run_id)).await;
    }

    /// Poll the fake backend until `condition` holds.
    async fn until(&self, condition: impl Fn(&FakeAuditApi) -> bool) {
        let poll = async {
            while !condition(&self.api) {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        };
        tokio::time::timeout(WAIT, poll).await.expect("timed out waiting for backend state");
    }
}

fn run_status(run_id: &str, status: &str, error_message: Option<&str>) -> RunStatusResponse {
    RunStatusResponse {
        run_id: RunId::new(run_id),
        status: status.to_string().into(),
        error_message: error_message.map(str::to_string),
    }
}

fn candidate_result(id: &str) -> CandidateResult {
    CandidateResult::builder().candidate_id(id).build()
}
