use thiserror::Error;

/// Errors that can occur while reading, writing or reshaping a [`crate::Table`].
#[derive(Debug, Error)]
pub enum TableError {
    /// I/O error while reading or writing a table file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV content
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A column required by an operation is not present
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A row does not have one cell per header
    #[error("Row has {actual} cells, expected {expected}")]
    RowWidth { expected: usize, actual: usize },
}

impl TableError {
    pub fn missing_column(name: impl Into<String>) -> Self {
        Self::MissingColumn(name.into())
    }
}
