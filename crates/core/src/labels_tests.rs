// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    sql_trace      = { "sql_trace", "SQL Trace" },
    padded_upper   = { "  Cross_Account ", "Cross-Account Analysis" },
    identity       = { "identity_access", "Identity & Access" },
    unknown_snake  = { "device_fingerprint", "Device Fingerprint" },
    unknown_kebab  = { "geo-velocity", "Geo Velocity" },
    doubled_sep    = { "ip__reuse", "Ip Reuse" },
    already_titled = { "Manual Review", "Manual Review" },
)]
fn source_labels(source: &str, expected: &str) {
    assert_eq!(friendly_source_label(source), expected);
}

#[test]
fn source_list_labels_each_key() {
    assert_eq!(friendly_source_list("sql_trace,web_trace"), "SQL Trace, Web Trace");
    assert_eq!(friendly_source_list("unknown"), "Unknown");
}
