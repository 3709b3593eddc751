//! CLI configuration: parsed from an optional TOML file + environment overrides.
//!
//! Priority: environment variables > config file > defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub output: OutputSection,

    #[serde(default)]
    pub logging: LoggingSection,
}

/// Output rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    /// "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_format() -> String {
    "text".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

const FORMATS: &[&str] = &["text", "json"];
const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

impl CliConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse TOML config")
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `PMTA_ERRCODES_FORMAT`
    /// - `PMTA_ERRCODES_LOG_LEVEL`
    pub fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("PMTA_ERRCODES_FORMAT") {
            self.output.format = v;
        }
        if let Ok(v) = std::env::var("PMTA_ERRCODES_LOG_LEVEL") {
            self.logging.log_level = v;
        }
    }

    pub fn json(&self) -> bool {
        self.output.format.eq_ignore_ascii_case("json")
    }

    /// Validate that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            FORMATS.contains(&self.output.format.to_ascii_lowercase().as_str()),
            "output.format must be one of {:?}, got {:?}",
            FORMATS,
            self.output.format
        );
        anyhow::ensure!(
            LOG_LEVELS.contains(&self.logging.log_level.to_ascii_lowercase().as_str()),
            "logging.log_level must be one of {:?}, got {:?}",
            LOG_LEVELS,
            self.logging.log_level
        );
        Ok(())
    }
}
