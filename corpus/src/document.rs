//! Document model for loaded knowledge files.

use serde::{Deserialize, Serialize};

/// A single knowledge file, read fully into memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// File name the content came from, used as the source label.
    pub source: String,

    /// Full UTF-8 content of the file.
    pub content: String,

    /// Names of the partitions this document was routed into.
    pub partitions: Vec<String>,
}

impl Document {
    /// Create a document with its partition tags.
    pub fn new(
        source: impl Into<String>,
        content: impl Into<String>,
        partitions: Vec<String>,
    ) -> Self {
        Self {
            source: source.into(),
            content: content.into(),
            partitions,
        }
    }

    /// Content length in characters.
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}
