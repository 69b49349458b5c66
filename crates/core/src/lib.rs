// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rw-core: domain types for reconstructing background audit runs

pub mod macros;

pub mod candidate;
pub mod clock;
pub mod cluster;
pub mod effect;
pub mod event;
pub mod id;
pub mod labels;
pub mod phase;
pub mod run;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use candidate::{
    confidence_explainer, quality_explainer, CandidateResult, EvidenceUnit, PatternCard, Severity,
    SqlFinding, WebReference,
};
pub use clock::{Clock, FakeClock, SystemClock};
pub use cluster::{friendly_tool_label, ClusterStep, ToolCall};
pub use effect::{Effect, FetchReason};
pub use event::{AuditEvent, EventKind, Metadata};
pub use id::{CandidateId, ClusterId, RunId};
pub use labels::{friendly_source_label, friendly_source_list};
pub use phase::{phase_index, seconds_between, Phase, PhaseName, StepStatus};
pub use run::{RemoteRunStatus, RunStatus};
