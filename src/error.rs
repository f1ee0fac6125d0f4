//! Error handling for the assessment recommender

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecommenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid query: {0}")]
    Validation(String),

    #[error("Upstream provider error: {0}")]
    UpstreamProvider(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, RecommenderError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for RecommenderError {
    fn from(err: anyhow::Error) -> Self {
        RecommenderError::Embedding(err.to_string())
    }
}
