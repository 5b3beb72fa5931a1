//! Run configuration: where to read the feed and where to write results.
//!
//! Loaded from TOML. Every field has a default, so an empty file (or no file)
//! is a valid configuration. Strategy constants are not configurable here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading a run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Input/output settings for one backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Tab-delimited 15-minute candle feed.
    pub input: PathBuf,
    /// Spreadsheet written after a run with at least one trade.
    pub output: PathBuf,
    /// Worksheet title (Excel limits this to 31 characters).
    pub sheet_title: String,
    /// Optional comma-delimited trade tape.
    pub csv_output: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("xau_usd_m15.csv"),
            output: PathBuf::from("gold_strategy_backtest.xlsx"),
            sheet_title: "Gold Strategy Backtest".to_string(),
            csv_output: None,
        }
    }
}

impl RunConfig {
    /// Load and validate a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the settings that would otherwise fail only at export time.
    ///
    /// The title is checked exactly as it will be written to the workbook.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let title = self.sheet_title.as_str();
        if title.trim().is_empty() {
            return Err(ConfigError::Invalid("sheet_title must not be empty".into()));
        }
        if title.chars().count() > 31 {
            return Err(ConfigError::Invalid(format!(
                "sheet_title '{title}' exceeds 31 characters"
            )));
        }
        if let Some(bad) = title.chars().find(|c| "[]:*?/\\".contains(*c)) {
            return Err(ConfigError::Invalid(format!(
                "sheet_title contains forbidden character '{bad}'"
            )));
        }
        if title.starts_with('\'') || title.ends_with('\'') {
            return Err(ConfigError::Invalid(format!(
                "sheet_title '{title}' must not start or end with an apostrophe"
            )));
        }
        if title.eq_ignore_ascii_case("History") {
            return Err(ConfigError::Invalid(
                "sheet_title 'History' is reserved by Excel".into(),
            ));
        }
        Ok(())
    }
}
