// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Settings resolution: flag > environment > config file > defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);
pub const DEFAULT_LOOKBACK_DAYS: u32 = 7;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub api_base: Option<String>,
    pub timeout_ms: Option<u64>,
    pub lookback_days: Option<u32>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// Load `RW_CONFIG` if set, else the default location when it exists.
    pub fn discover() -> Result<Self, ConfigError> {
        if let Some(path) = crate::env::config_path() {
            return Self::load(&path);
        }
        match crate::env::default_config_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}

/// Values given on the command line.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub api_base: Option<String>,
    pub timeout_ms: Option<u64>,
    pub lookback_days: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base: String,
    pub timeout: Duration,
    pub lookback_days: u32,
}

impl Settings {
    pub fn resolve(flags: Overrides, file: FileConfig) -> Self {
        let api_base = flags
            .api_base
            .or_else(crate::env::api_base)
            .or(file.api_base)
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let timeout = flags
            .timeout_ms
            .map(Duration::from_millis)
            .or_else(crate::env::timeout)
            .or(file.timeout_ms.map(Duration::from_millis))
            .unwrap_or(DEFAULT_TIMEOUT);
        let lookback_days = flags
            .lookback_days
            .or_else(crate::env::lookback_days)
            .or(file.lookback_days)
            .unwrap_or(DEFAULT_LOOKBACK_DAYS);
        Self { api_base, timeout, lookback_days }
    }

    /// Resolve against the discovered config file.
    pub fn load(flags: Overrides) -> Result<Self, ConfigError> {
        Ok(Self::resolve(flags, FileConfig::discover()?))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
