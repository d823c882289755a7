//! # Nexus Retrieval
//!
//! This crate provides the partitioned retrieval pipeline that combines:
//!
//! - **Corpus Loading**: Keyword-routed knowledge documents
//! - **Chunk Splitting**: Deterministic overlapping windows
//! - **Vector Search**: One similarity index per partition
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Knowledge Base                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                  │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐          │
//! │  │    Corpus    │  │     Text     │  │   Embedder   │          │
//! │  │    Loader    │  │   Splitter   │  │ (injected)   │          │
//! │  └──────────────┘  └──────────────┘  └──────────────┘          │
//! │         │                │                  │                   │
//! │         └────────────────┼──────────────────┘                   │
//! │                          ▼                                      │
//! │                  ┌──────────────┐                               │
//! │                  │  Knowledge   │                               │
//! │                  │     Base     │  built once, queried many     │
//! │                  └──────────────┘                               │
//! │                          │                                      │
//! │                          ▼                                      │
//! │                  ┌──────────────┐                               │
//! │                  │  Retrieved   │                               │
//! │                  │   Context    │                               │
//! │                  └──────────────┘                               │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use nexus_embeddings::GeminiEmbedder;
//! use nexus_retrieval::KnowledgeBase;
//!
//! let base = KnowledgeBase::builder()
//!     .with_data_dir("data")
//!     .with_embedder(Arc::new(GeminiEmbedder::new()))
//!     .build()?;
//!
//! let context = base.context_for("lol", "how hard was the Kai'Sa nerf?").await?;
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod splitter;

pub use config::RetrievalConfig;
pub use engine::{KnowledgeBase, KnowledgeBaseBuilder, KnowledgeStats, RetrievedContext};
pub use error::{Result, RetrievalError};
pub use splitter::{Chunk, SplitterConfig, TextSplitter};

// Re-export from dependencies for convenience
pub use nexus_corpus::{Corpus, CorpusConfig, Document, LoadReport, PartitionSpec};
pub use nexus_embeddings::{Embedder, Hit};
