//! Centralized constants for the report downloader
//!
//! Workplace-specific values live in config.toml; these are the defaults
//! used when a setting is not configured.

// =============================================================================
// File Names
// =============================================================================

/// Default config file path
pub const CONFIG_FILE: &str = "config.toml";

/// Default output directory for reports and summaries
pub const OUTPUT_DIR: &str = "./output";

/// Default input folder for `convert`
pub const CONVERT_INPUT_DIR: &str = "inputs";

/// Default output folder for `convert`
pub const CONVERT_OUTPUT_DIR: &str = "outputs";

// =============================================================================
// Rate Limiting
// =============================================================================

/// Delay after each downloaded category report (ms)
pub const ARTIFACT_DELAY_MS: u64 = 800;

/// Delay after each monthly summary (ms)
pub const PERIOD_DELAY_MS: u64 = 1500;

// =============================================================================
// HTTP
// =============================================================================

/// Per-request timeout (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
