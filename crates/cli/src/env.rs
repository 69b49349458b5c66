// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use std::path::PathBuf;
use std::time::Duration;

/// Backend base URL override.
pub fn api_base() -> Option<String> {
    std::env::var("RW_API_BASE").ok().filter(|s| !s.is_empty())
}

/// Request timeout override in milliseconds.
pub fn timeout() -> Option<Duration> {
    std::env::var("RW_TIMEOUT_MS").ok().and_then(|s| s.parse::<u64>().ok()).map(Duration::from_millis)
}

pub fn lookback_days() -> Option<u32> {
    std::env::var("RW_LOOKBACK_DAYS").ok().and_then(|s| s.parse::<u32>().ok())
}

/// Explicit config file path. A file named here must exist.
pub fn config_path() -> Option<PathBuf> {
    std::env::var("RW_CONFIG").ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}

/// Resolve the default config file: XDG_CONFIG_HOME/runwatch > platform config dir
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return Some(PathBuf::from(xdg).join("runwatch/config.toml"));
        }
    }
    dirs::config_dir().map(|dir| dir.join("runwatch/config.toml"))
}

/// Log filter directive (default `warn`).
pub fn log_filter() -> String {
    std::env::var("RW_LOG").ok().filter(|s| !s.is_empty()).unwrap_or_else(|| "warn".to_string())
}
