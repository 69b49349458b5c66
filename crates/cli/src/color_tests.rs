// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
#[serial]
fn styles_returns_styled_when_color_forced() {
    std::env::set_var("COLOR", "1");
    std::env::remove_var("NO_COLOR");

    let debug = format!("{:?}", styles());
    std::env::remove_var("COLOR");
    assert_ne!(debug, format!("{:?}", Styles::plain()));
}

#[test]
#[serial]
fn styles_returns_plain_when_no_color() {
    std::env::set_var("NO_COLOR", "1");
    std::env::remove_var("COLOR");

    let debug = format!("{:?}", styles());
    std::env::remove_var("NO_COLOR");
    assert_eq!(debug, format!("{:?}", Styles::plain()));
}

#[test]
#[serial]
fn header_produces_ansi_when_color_forced() {
    std::env::set_var("COLOR", "1");
    std::env::remove_var("NO_COLOR");

    let result = header("Run R1");
    std::env::remove_var("COLOR");
    assert!(result.starts_with("\x1b[38;5;74m"), "expected ANSI header color");
    assert!(result.contains("Run R1"));
    assert!(result.ends_with("\x1b[0m"), "expected ANSI reset");
}

#[test]
#[serial]
fn no_color_wins_over_forced_color() {
    std::env::set_var("COLOR", "1");
    std::env::set_var("NO_COLOR", "1");

    let result = failure("Audit stream disconnected");
    std::env::remove_var("COLOR");
    std::env::remove_var("NO_COLOR");
    assert_eq!(result, "Audit stream disconnected");
}
