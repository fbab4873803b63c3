use thiserror::Error;

/// Crate-wide error type.
///
/// Validation problems in client input never reach this type: malformed
/// filters and metadata are dropped or defaulted before compilation.
#[derive(Debug, Error)]
pub enum FormResponsesError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Upstream error: {0}")]
    UpstreamError(String),

    #[error("Model error: {0}")]
    ModelError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl FormResponsesError {
    pub fn model(message: impl Into<String>) -> Self {
        Self::ModelError(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::UpstreamError(message.into())
    }
}

impl From<reqwest::Error> for FormResponsesError {
    fn from(err: reqwest::Error) -> Self {
        Self::UpstreamError(err.to_string())
    }
}

impl From<serde_json::Error> for FormResponsesError {
    fn from(err: serde_json::Error) -> Self {
        Self::ModelError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FormResponsesError>;
