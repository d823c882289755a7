//! Deterministic sliding-window text splitting.

use nexus_corpus::Document;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RetrievalError};

/// A contiguous window of a document's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// The chunk text.
    pub text: String,

    /// Source document label.
    pub source: String,
}

/// Configuration for the text splitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitterConfig {
    /// Maximum chunk length in characters.
    pub chunk_size: usize,

    /// Characters shared between consecutive chunks of the same document.
    pub chunk_overlap: usize,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

impl SplitterConfig {
    /// Create a splitter config.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(RetrievalError::Config(
                "chunk_size must be > 0".to_string(),
            ));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(RetrievalError::Config(format!(
                "chunk overlap ({}) must be smaller than chunk size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        Ok(())
    }
}

/// Splits document content into overlapping character windows.
///
/// Windows advance by `chunk_size - chunk_overlap` characters, so chunk
/// boundaries depend only on the content. Offsets are counted in characters,
/// never bytes, so multi-byte text cannot split inside a code point.
pub struct TextSplitter {
    config: SplitterConfig,
}

impl TextSplitter {
    /// Create a splitter, validating the configuration.
    pub fn new(config: SplitterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The splitter's configuration.
    pub fn config(&self) -> SplitterConfig {
        self.config
    }

    /// Split content into overlapping windows.
    ///
    /// Content no longer than the chunk size yields a single chunk, even
    /// when empty.
    pub fn split(&self, content: &str) -> Vec<String> {
        let chars: Vec<char> = content.chars().collect();
        if chars.len() <= self.config.chunk_size {
            return vec![content.to_string()];
        }

        let step = self.config.chunk_size - self.config.chunk_overlap;
        let mut chunks = Vec::new();
        let mut start = 0;
        loop {
            let end = usize::min(start + self.config.chunk_size, chars.len());
            chunks.push(chars[start..end].iter().collect());
            if end == chars.len() {
                break;
            }
            start += step;
        }
        chunks
    }

    /// Split a document into chunks carrying its source label.
    pub fn split_document(&self, document: &Document) -> Vec<Chunk> {
        self.split(&document.content)
            .into_iter()
            .map(|text| Chunk {
                text,
                source: document.source.clone(),
            })
            .collect()
    }
}
