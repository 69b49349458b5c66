// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human-friendly names for evidence source keys.

fn known_source_label(normalized: &str) -> Option<&'static str> {
    match normalized {
        "constellation_analysis" => Some("Triage Constellation"),
        "cross_account" => Some("Cross-Account Analysis"),
        "financial_behavior" => Some("Financial Behavior"),
        "identity_access" => Some("Identity & Access"),
        "triage" => Some("Triage Analysis"),
        "investigator" => Some("Investigator Finding"),
        "supporting" => Some("Supporting Evidence"),
        "sql_trace" => Some("SQL Trace"),
        "web_trace" => Some("Web Trace"),
        _ => None,
    }
}

/// Map a raw source key to a label, title-casing unknown keys.
pub fn friendly_source_label(source: &str) -> String {
    if let Some(label) = known_source_label(&source.trim().to_lowercase()) {
        return label.to_string();
    }
    let spaced: String =
        source.chars().map(|c| if c == '_' || c == '-' { ' ' } else { c }).collect();
    let mut out = String::with_capacity(spaced.len());
    let mut at_word_start = true;
    for c in spaced.chars() {
        if at_word_start && c.is_alphanumeric() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !c.is_alphanumeric();
    }
    // Runs of separators collapse to a single space.
    out.split(' ').filter(|w| !w.is_empty()).collect::<Vec<_>>().join(" ")
}

/// Label every key of a comma-joined `source_type`.
pub fn friendly_source_list(source_type: &str) -> String {
    source_type.split(',').map(friendly_source_label).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
#[path = "labels_tests.rs"]
mod tests;
