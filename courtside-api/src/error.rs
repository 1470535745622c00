use courtside_core::TableError;
use courtside_lib::FetchError;

/// Errors that can occur talking to the statistics API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Result set '{0}' not found in response")]
    MissingResultSet(String),

    #[error("Unexpected response shape: {0}")]
    Shape(String),

    #[error(transparent)]
    Table(#[from] TableError),
}

impl ApiError {
    pub fn shape(msg: impl Into<String>) -> Self {
        Self::Shape(msg.into())
    }
}

impl From<ApiError> for FetchError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Http(_) | ApiError::Status { .. } => FetchError::transient(e.to_string()),
            _ => FetchError::malformed(e.to_string()),
        }
    }
}
