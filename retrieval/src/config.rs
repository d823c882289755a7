//! Configuration for the knowledge base.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use nexus_corpus::{CorpusConfig, PartitionSpec};

use crate::error::{Result, RetrievalError};
use crate::splitter::SplitterConfig;

/// Configuration for building and querying the knowledge base.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Corpus loading and partition routing.
    pub corpus: CorpusConfig,

    /// Chunk splitting parameters.
    pub splitter: SplitterConfig,

    /// Number of chunks returned per query by default.
    pub top_k: usize,
}

impl RetrievalConfig {
    /// Create a configuration for the given data directory with default
    /// partitions and splitting.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            corpus: CorpusConfig::new(data_dir),
            ..Default::default()
        }
    }

    /// Set the corpus configuration.
    pub fn with_corpus(mut self, corpus: CorpusConfig) -> Self {
        self.corpus = corpus;
        self
    }

    /// Set the splitter configuration.
    pub fn with_splitter(mut self, splitter: SplitterConfig) -> Self {
        self.splitter = splitter;
        self
    }

    /// Set the default result count per query.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Add a partition to the corpus configuration.
    pub fn add_partition(mut self, partition: PartitionSpec) -> Self {
        self.corpus = self.corpus.add_partition(partition);
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.corpus.validate()?;
        self.splitter.validate()?;
        if self.top_k == 0 {
            return Err(RetrievalError::Config("top_k must be > 0".to_string()));
        }
        Ok(())
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            corpus: CorpusConfig::default(),
            splitter: SplitterConfig::default(),
            top_k: 4,
        }
    }
}
