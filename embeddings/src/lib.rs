//! # Nexus Embeddings
//!
//! This crate provides embedding generation and similarity search for the
//! Nexus knowledge base.
//!
//! ## Features
//!
//! - **Embedding Generation**: Convert text to dense vectors
//! - **Similarity Search**: Find the closest chunks to a query
//! - **Multiple Providers**: Google Gemini or a deterministic local hasher
//! - **In-memory Indexing**: One dimension-checked vector index per partition
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Embeddings System                           │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  Embedder ──────► Embedding ─────► VectorIndex                  │
//! │      │                │                 │                       │
//! │      ▼                ▼                 ▼                       │
//! │  Gemini/Hash     normalize()        Hit (scored)                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod index;
pub mod provider;
pub mod similarity;

pub use error::{EmbeddingError, Result};
pub use index::{Hit, VectorIndex};
pub use provider::{Embedder, GeminiEmbedder, HashEmbedder};
pub use similarity::cosine_similarity;

/// A dense vector embedding.
pub type Embedding = Vec<f32>;

/// Dimension of embeddings (varies by model).
pub const DEFAULT_DIMENSION: usize = 768; // Gemini text-embedding-004
