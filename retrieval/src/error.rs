//! Error types for the retrieval pipeline.

use thiserror::Error;

/// Result type alias for retrieval operations.
pub type Result<T> = std::result::Result<T, RetrievalError>;

/// Errors that can occur while building or querying the knowledge base.
#[derive(Error, Debug)]
pub enum RetrievalError {
    /// Corpus loading error.
    #[error("corpus error: {0}")]
    Corpus(#[from] nexus_corpus::CorpusError),

    /// Embedding error.
    #[error("embedding error: {0}")]
    Embedding(#[from] nexus_embeddings::EmbeddingError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}
