//! Configuration for the report downloader

use anyhow::{Context, Result};
use insurance_core::{ColumnLayout, Pacing, PortalProfile};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants;

// =============================================================================
// File-based Configuration (config.toml)
// =============================================================================

/// Configuration loaded from config.toml. Every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Workplace identifiers and portal endpoint
    pub portal: PortalProfile,
    pub pacing: PacingConfig,
    /// Column positions in the downloaded reports
    pub columns: ColumnLayout,
    pub http: HttpConfig,
}

/// Delays toward the portal, in milliseconds
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Wait after each saved raw report
    pub artifact_delay_ms: u64,
    /// Wait after each monthly summary
    pub period_delay_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            artifact_delay_ms: constants::ARTIFACT_DELAY_MS,
            period_delay_ms: constants::PERIOD_DELAY_MS,
        }
    }
}

/// HTTP client settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: constants::REQUEST_TIMEOUT_SECS,
        }
    }
}

impl FileConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Load the file if it exists, otherwise fall back to built-in defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| {
            "Invalid config. Check for:\n\
             - Invalid TOML syntax (missing quotes, brackets, etc.)\n\
             - Incorrect data types (column indices and delays are numbers)\n\n\
             See config.toml.example for the expected format."
        })
    }
}

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Settings for one run
pub struct Config {
    pub profile: PortalProfile,
    pub layout: ColumnLayout,
    pub pacing: Pacing,
    pub request_timeout: Duration,
    /// Where raw reports and summaries are written
    pub output_dir: PathBuf,
}

impl Config {
    pub fn from_file(file_config: FileConfig, output_dir: PathBuf) -> Self {
        Self {
            profile: file_config.portal,
            layout: file_config.columns,
            pacing: Pacing {
                after_artifact: Duration::from_millis(file_config.pacing.artifact_delay_ms),
                after_summary: Duration::from_millis(file_config.pacing.period_delay_ms),
            },
            request_timeout: Duration::from_secs(file_config.http.timeout_secs),
            output_dir,
        }
    }
}
