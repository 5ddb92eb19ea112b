//! Error types for the contribution pipeline
//!
//! Input errors are fatal and stop a run before any request is sent.
//! Fetch and parse errors are scoped to one (period, category) attempt and
//! are logged by the driver instead of aborting the run.

use thiserror::Error;

use crate::period::Period;

/// Invalid or missing run parameters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The operator closed the prompt (end of input)
    #[error("input canceled")]
    Canceled,

    #[error("{field} is not a number: '{value}'")]
    NotANumber { field: &'static str, value: String },

    #[error("{field} must be between 1 and 12, got {value}")]
    MonthOutOfRange { field: &'static str, value: u32 },

    #[error("invalid year/month '{0}', expected YYYY-MM")]
    InvalidYearMonth(String),

    #[error("business number must be 10 or 11 digits, got '{0}'")]
    InvalidBusinessNumber(String),
}

/// Failure retrieving one report
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("portal returned HTTP status {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Transport(String),
}

/// Failure turning one report into rows
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("report is not valid EUC-KR text")]
    Decode,

    #[error("line {line}: no personal identifier in column {column}")]
    MissingPersonKey { line: usize, column: usize },

    #[error("malformed report: {0}")]
    Csv(String),
}

impl From<csv::Error> for ParseError {
    fn from(err: csv::Error) -> Self {
        ParseError::Csv(err.to_string())
    }
}

/// Why a single category attempt failed within a period
#[derive(Error, Debug)]
pub enum CategoryError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// The output sink could not store an artifact
#[derive(Error, Debug)]
#[error("failed to write {file_name}: {source}")]
pub struct SinkError {
    pub file_name: String,
    #[source]
    pub source: std::io::Error,
}

/// Errors that stop a whole run
#[derive(Error, Debug)]
pub enum RunError {
    #[error("summary for {period} could not be rendered: {source}")]
    Summary {
        period: Period,
        #[source]
        source: csv::Error,
    },

    #[error("summary for {period} could not be saved: {source}")]
    SummaryArtifact {
        period: Period,
        #[source]
        source: SinkError,
    },
}
