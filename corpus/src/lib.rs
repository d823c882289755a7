//! # Nexus Corpus
//!
//! This crate loads the scraped game-knowledge files behind the Nexus
//! assistant and routes each one into named partitions by file name.
//!
//! ## Features
//!
//! - **Single-pass Loading**: Read every knowledge file once at startup
//! - **Keyword Routing**: Case-insensitive file-name classification
//! - **Replication Fallback**: Unmatched files land in every partition
//! - **Load Reporting**: Per-partition counts and skipped-file totals
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Corpus Loader                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  CorpusConfig ──► CorpusLoader ──► Corpus                       │
//! │       │                │              │                         │
//! │       ▼                ▼              ▼                         │
//! │  PartitionSpec     classify()     LoadReport                    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod loader;

pub use config::{CorpusConfig, PartitionSpec};
pub use document::Document;
pub use error::{CorpusError, Result};
pub use loader::{Corpus, CorpusLoader, LoadReport};
