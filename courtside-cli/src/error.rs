use thiserror::Error;

use courtside_api::ApiError;
use courtside_lib::PipelineError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// A pipeline step failed outright
    #[error("{0}")]
    Pipeline(#[from] PipelineError),

    /// The API client could not be created
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Logging could not be set up
    #[error("Logging error: {0}")]
    Logging(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn logging(msg: impl Into<String>) -> Self {
        Self::Logging(msg.into())
    }
}
