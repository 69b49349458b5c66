// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Phase tracker: pending → active → completed, in run order.
//!
//! Events can arrive late or not at all, so every handler first backfills:
//! phases ordered before the one an event names are completed on the spot.

use crate::messages;
use chrono::{DateTime, Utc};
use rw_core::{AuditEvent, Phase, PhaseName, StepStatus};

fn phase_mut(phases: &mut [Phase], name: PhaseName) -> Option<&mut Phase> {
    phases.iter_mut().find(|p| p.name == name)
}

fn named_phase(event: &AuditEvent) -> Option<PhaseName> {
    let name = event.phase.as_deref().and_then(PhaseName::parse);
    if name.is_none() {
        tracing::debug!(event = %event.kind, phase = ?event.phase, "ignoring event for unknown phase");
    }
    name
}

/// Force-complete every phase ordered before `target`.
pub(crate) fn backfill(phases: &mut [Phase], target: PhaseName, at: DateTime<Utc>) {
    for phase in phases.iter_mut().filter(|p| p.name < target) {
        let detail = phase.name.auto_detail();
        if phase.complete(at, detail) {
            tracing::debug!(phase = %phase.name, "backfilled phase");
        }
    }
}

/// Backfill, then start `P` if it is still pending, completing any other
/// active phase first. A start for an active or completed `P` is a
/// redelivery and leaves every other phase untouched.
pub(crate) fn on_phase_start(phases: &mut [Phase], event: &AuditEvent) {
    let Some(name) = named_phase(event) else {
        return;
    };
    backfill(phases, name, event.timestamp);

    let pending = phase_mut(phases, name).is_some_and(|p| p.status == StepStatus::Pending);
    if !pending {
        return;
    }
    for other in phases.iter_mut().filter(|p| p.name != name && p.status == StepStatus::Active) {
        let detail = other.name.auto_detail();
        other.complete(event.timestamp, detail);
    }
    if let Some(phase) = phase_mut(phases, name) {
        phase.start(event.timestamp);
    }
}

pub(crate) fn on_progress(phases: &mut [Phase], event: &AuditEvent) {
    let Some(name) = named_phase(event) else {
        return;
    };
    backfill(phases, name, event.timestamp);

    let Some(phase) = phase_mut(phases, name) else {
        return;
    };
    if phase.status.is_completed() {
        if let Some(detail) = event.detail() {
            phase.detail = Some(detail.to_string());
        }
        return;
    }
    phase.detail = Some(event.detail().unwrap_or(name.auto_detail()).to_string());
    phase.complete(event.timestamp, name.auto_detail());
}

/// Cluster activity implies investigation is underway.
pub(crate) fn ensure_investigate_active(phases: &mut [Phase], at: DateTime<Utc>) {
    backfill(phases, PhaseName::Investigate, at);
    if let Some(phase) = phase_mut(phases, PhaseName::Investigate) {
        phase.start(at);
    }
}

pub(crate) fn complete_all(phases: &mut [Phase], at: DateTime<Utc>) {
    for phase in phases.iter_mut() {
        let detail = phase.name.auto_detail();
        phase.complete(at, detail);
    }
}

pub(crate) fn mark_loaded(phases: &mut [Phase], now: DateTime<Utc>) {
    for phase in phases.iter_mut() {
        phase.status = StepStatus::Completed;
        if phase.detail.as_deref().is_none_or(str::is_empty) {
            phase.detail = Some(messages::LOADED_FROM_PAST_RUN.to_string());
        }
        phase.started_at.get_or_insert(now);
        phase.duration.get_or_insert(0.0);
    }
}

#[cfg(test)]
#[path = "phases_tests.rs"]
mod tests;
