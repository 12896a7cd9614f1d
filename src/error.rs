use thiserror::Error;

/// Result type used across the loader.
pub type Result<T> = std::result::Result<T, DatasetError>;

#[derive(Debug, Error)]
pub enum DatasetError {
    /// Local file missing/unreadable or remote endpoint unreachable.
    #[error("Dataset source unavailable ({location}): {reason}")]
    SourceUnavailable { location: String, reason: String },

    /// Content is not valid Parquet, or could not be decoded into Arrow.
    #[error("Format error: {0}")]
    Format(String),

    /// The raw schema does not match the expected movie columns.
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Cannot sample {requested} rows from a dataset of {available} rows")]
    SampleOutOfRange { requested: usize, available: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl DatasetError {
    pub fn unavailable(location: impl Into<String>, reason: impl ToString) -> Self {
        DatasetError::SourceUnavailable {
            location: location.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<parquet::errors::ParquetError> for DatasetError {
    fn from(e: parquet::errors::ParquetError) -> Self {
        DatasetError::Format(e.to_string())
    }
}

impl From<arrow::error::ArrowError> for DatasetError {
    fn from(e: arrow::error::ArrowError) -> Self {
        DatasetError::Format(e.to_string())
    }
}

impl From<serde_yaml::Error> for DatasetError {
    fn from(e: serde_yaml::Error) -> Self {
        DatasetError::Config(e.to_string())
    }
}

impl From<url::ParseError> for DatasetError {
    fn from(e: url::ParseError) -> Self {
        DatasetError::Config(e.to_string())
    }
}
