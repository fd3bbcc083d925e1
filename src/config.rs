//! Scan configuration.
//!
//! Settings are loaded from environment variables with defaults and can be
//! overridden from the command line.
//!
//! # Environment Variables
//! - `CODESCOPE_MAX_FILE_SIZE`: per-file read cap in bytes - default: 2097152 (2 MiB)
//! - `CODESCOPE_LOG_LEVEL`: logging level - default: "info"

use crate::error::ConfigError;
use std::env;

const DEFAULT_MAX_FILE_SIZE: u64 = 2 * 1024 * 1024;
const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Settings shared by every scanning phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Files larger than this are skipped by every content reader.
    pub max_file_size: u64,
    /// Logging level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ScanConfig {
    /// Loads configuration from the environment, falling back to defaults for
    /// unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("CODESCOPE_MAX_FILE_SIZE") {
            config.max_file_size = raw.trim().parse::<u64>().map_err(|e| ConfigError::ParseError {
                field: "CODESCOPE_MAX_FILE_SIZE".to_string(),
                error: e.to_string(),
            })?;
        }

        if let Some(level) = lookup("CODESCOPE_LOG_LEVEL") {
            config.log_level = level.trim().to_lowercase();
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks that the configured values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(self.log_level.clone()));
        }
        if self.max_file_size == 0 {
            return Err(ConfigError::ParseError {
                field: "max_file_size".to_string(),
                error: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
