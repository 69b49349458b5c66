// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rendering of run progress and the final run summary.

use std::fmt::Write;

use clap::ValueEnum;
use rw_core::{
    confidence_explainer, friendly_source_list, quality_explainer, CandidateResult, Phase,
    StepStatus,
};
use rw_engine::RunState;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Describe what changed between two published states, one line per change.
pub fn progress_lines(prev: &RunState, next: &RunState) -> Vec<String> {
    let mut lines = Vec::new();
    if next.run_id != prev.run_id {
        if let Some(run_id) = &next.run_id {
            lines.push(format!("Run {run_id}"));
        }
    }

    for (before, after) in prev.phases.iter().zip(&next.phases) {
        if before.status == after.status {
            continue;
        }
        match after.status {
            StepStatus::Active => lines.push(format!("▸ {}", after.label)),
            StepStatus::Completed => lines.push(format!("✓ {}", phase_summary(after))),
            StepStatus::Pending => {}
        }
    }

    for cluster in &next.clusters {
        let before = prev.clusters.iter().find(|c| c.cluster_id == cluster.cluster_id);
        let seen_tools = before.map_or(0, |c| c.tool_calls.len());
        if before.is_none() {
            lines.push(format!(
                "  + {} ({} events, {} accounts; {})",
                cluster.label,
                cluster.event_count,
                cluster.account_count,
                friendly_source_list(&cluster.source_type)
            ));
        }
        for call in cluster.tool_calls.iter().skip(seen_tools) {
            lines.push(format!("    {}", call.friendly_label));
        }
        let had_pattern = before.is_some_and(|c| c.pattern_name.is_some());
        if let (Some(pattern), false) = (&cluster.pattern_name, had_pattern) {
            lines.push(format!("  = {}: {}", cluster.label, pattern));
        }
    }
    lines
}

/// `Label (12.0s): detail`, leaving out whatever the phase lacks.
fn phase_summary(phase: &Phase) -> String {
    let mut out = phase.label.clone();
    if let Some(duration) = phase.duration {
        let _ = write!(out, " ({duration:.1}s)");
    }
    if let Some(detail) = phase.detail.as_deref().filter(|d| !d.is_empty()) {
        let _ = write!(out, ": {detail}");
    }
    out
}

/// Candidate block for the final summary.
pub fn format_candidate(candidate: &CandidateResult) -> String {
    let mut out = format!(
        "[{}] {}\n    confidence {:.0}%: {}\n    quality {:.0}%: {}",
        candidate.severity(),
        candidate.display_title(),
        candidate.confidence * 100.0,
        confidence_explainer(candidate.confidence),
        candidate.quality_score * 100.0,
        quality_explainer(candidate.quality_score),
    );
    let _ = write!(out, "\n    support: {} events", candidate.support_events);
    if let Some(accounts) = candidate.support_accounts {
        let _ = write!(out, ", {accounts} accounts");
    }
    out
}

/// Phases and candidates of a finished run. The caller prints the heading
/// and any error.
pub fn format_summary(state: &RunState) -> String {
    let mut out = String::new();
    for phase in &state.phases {
        let mark = match phase.status {
            StepStatus::Completed => "✓",
            StepStatus::Active => "▸",
            StepStatus::Pending => "·",
        };
        let _ = writeln!(out, "{mark} {}", phase_summary(phase));
    }
    match state.candidates.len() {
        0 => out.push_str("\nNo candidates\n"),
        n => {
            let _ = writeln!(out, "\n{n} candidate(s)");
            for candidate in &state.candidates {
                let _ = writeln!(out, "{}", format_candidate(candidate));
            }
        }
    }
    out
}
