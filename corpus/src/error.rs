//! Error types for corpus loading.

use thiserror::Error;

/// Result type alias for corpus operations.
pub type Result<T> = std::result::Result<T, CorpusError>;

/// Errors that can occur while loading the corpus.
#[derive(Error, Debug)]
pub enum CorpusError {
    /// The data directory exists but could not be enumerated.
    #[error("failed to scan directory: {0}")]
    Scan(String),

    /// Invalid partition configuration.
    #[error("invalid partition config: {0}")]
    InvalidConfig(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
