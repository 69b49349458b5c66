// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Finalized fraud-pattern candidates as listed by the backend.
//!
//! These records are only ever taken from the authoritative candidate
//! listing. Fields are defaulted liberally because the backend's pattern
//! cards are produced by an LLM and vary in shape from run to run.

use crate::id::CandidateId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SqlFinding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_summary: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance: Option<String>,
}

/// A ranked piece of evidence. Sources disagree on field names, so unknown
/// keys are preserved in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvidenceUnit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withdrawal_id: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternCard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formal_pattern_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plain_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyst_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limitations: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uncertainty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clustering_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sql_findings: Vec<SqlFinding>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub web_references: Vec<WebReference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evidence_units: Vec<EvidenceUnit>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ranked_evidence: Vec<EvidenceUnit>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_trace: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_accounts: Option<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateResult {
    pub candidate_id: CandidateId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub quality_score: f64,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub support_events: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_accounts: Option<u64>,
    #[serde(default)]
    pub novelty_status: String,
    #[serde(default)]
    pub pattern_card: PatternCard,
}

impl CandidateResult {
    /// Title for display: the candidate title, else the formal pattern name,
    /// else the id.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .or(self.pattern_card.formal_pattern_name.as_deref())
            .unwrap_or(self.candidate_id.as_str())
    }

    pub fn severity(&self) -> Severity {
        Severity::from_confidence(self.confidence)
    }
}

crate::builder! {
    pub struct CandidateResultBuilder => CandidateResult {
        into {
            candidate_id: CandidateId = "CAND1",
            status: String = "accepted",
            novelty_status: String = "novel",
        }
        set {
            title: Option<String> = None,
            quality_score: f64 = 0.5,
            confidence: f64 = 0.5,
            support_events: u64 = 0,
            support_accounts: Option<u64> = None,
            pattern_card: PatternCard = PatternCard::default(),
        }
    }
}

/// Severity tier derived from a candidate's confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.8 {
            Severity::Critical
        } else if confidence >= 0.6 {
            Severity::High
        } else if confidence >= 0.4 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

crate::simple_display! {
    Severity {
        Low => "Low",
        Medium => "Medium",
        High => "High",
        Critical => "Critical",
    }
}

/// What a confidence score means to an officer reviewing the candidate.
pub fn confidence_explainer(confidence: f64) -> &'static str {
    match Severity::from_confidence(confidence) {
        Severity::Critical => "Very strong evidence this is real fraud",
        Severity::High => "Strong evidence, likely fraudulent activity",
        Severity::Medium => "Moderate evidence, needs officer review",
        Severity::Low => "Weak signal, may be legitimate activity",
    }
}

/// What a quality score says about the evidence behind a candidate.
pub fn quality_explainer(quality: f64) -> &'static str {
    if quality >= 0.8 {
        "Rich evidence from multiple independent sources"
    } else if quality >= 0.6 {
        "Good evidence with corroborating signals"
    } else if quality >= 0.4 {
        "Limited evidence, based on fewer data points"
    } else {
        "Thin evidence, treat as preliminary"
    }
}

#[cfg(test)]
#[path = "candidate_tests.rs"]
mod tests;
