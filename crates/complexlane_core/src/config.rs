//! Logging configuration for hosts and the CLI.
//!
//! # Responsibility
//! - Describe where and how verbosely the opt-in logger writes.
//! - Load that description from environment variables or serde input.
//!
//! # Invariants
//! - Blank environment values fall back to defaults.
//! - Kernels and operations never read configuration.

use crate::logging::{default_log_level, init_logging_with, LogLevel};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable overriding the log level.
pub const LOG_LEVEL_ENV: &str = "COMPLEXLANE_LOG_LEVEL";
/// Environment variable overriding the log directory.
pub const LOG_DIR_ENV: &str = "COMPLEXLANE_LOG_DIR";

const DEFAULT_LOG_DIR_NAME: &str = "complexlane-logs";

/// Opt-in logger settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// Must be absolute when applied.
    pub log_dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_dir: std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME),
        }
    }
}

impl LoggingConfig {
    /// Reads [`LOG_LEVEL_ENV`] and [`LOG_DIR_ENV`] over the defaults.
    ///
    /// # Errors
    /// - Returns an error when the level variable holds an unsupported value.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LoggingConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let mut config = Self::default();

        if let Some(raw) = non_blank(lookup(LOG_LEVEL_ENV)) {
            config.level = LogLevel::parse(&raw)?;
        }
        if let Some(raw) = non_blank(lookup(LOG_DIR_ENV)) {
            config.log_dir = PathBuf::from(raw);
        }

        Ok(config)
    }

    /// Starts the process logger with these settings.
    pub fn apply(&self) -> Result<(), String> {
        init_logging_with(self.level, &self.log_dir)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}
