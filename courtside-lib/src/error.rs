use courtside_core::{SeasonType, TableError};
use thiserror::Error;

/// Errors that stop a pipeline run or a file-level pipeline step.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Table(#[from] TableError),

    /// The work set could not be determined. This is the one fatal class.
    #[error("Failed to enumerate {scope} for {season_type}: {message}")]
    Enumeration {
        scope: String,
        season_type: SeasonType,
        message: String,
    },

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Failed to parse settings: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to serialize settings: {0}")]
    TomlWrite(#[from] toml::ser::Error),
}

impl PipelineError {
    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }
}

/// Failure of a single upstream call.
///
/// Every variant is retryable as far as the engine is concerned; the
/// distinction only matters for log messages.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Timeout, connection failure, non-success status
    #[error("transient failure: {0}")]
    Transient(String),

    /// The response arrived but could not be understood
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The response parsed but was not acceptable (e.g. an empty table)
    #[error("rejected response: {0}")]
    Rejected(String),
}

impl FetchError {
    pub fn transient(msg: impl Into<String>) -> Self {
        Self::Transient(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }
}

impl From<TableError> for FetchError {
    fn from(e: TableError) -> Self {
        Self::Malformed(e.to_string())
    }
}
