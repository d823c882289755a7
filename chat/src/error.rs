//! Error types for the chat layer.

use thiserror::Error;

/// Result type alias for chat operations.
pub type Result<T> = std::result::Result<T, ChatError>;

/// Errors that can occur while answering a question.
#[derive(Error, Debug)]
pub enum ChatError {
    /// Retrieval pipeline error.
    #[error("retrieval error: {0}")]
    Retrieval(#[from] nexus_retrieval::RetrievalError),

    /// Provider not configured.
    #[error("completion provider not configured")]
    ProviderNotConfigured,

    /// API request failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// Invalid response from provider.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded.
    #[error("rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}
