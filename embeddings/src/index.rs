//! In-memory vector index over embedded chunks.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Embedding;
use crate::error::{EmbeddingError, Result};
use crate::similarity::{find_top_k, normalize};

/// An entry in the vector index.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct IndexEntry {
    /// The embedding vector (normalized).
    embedding: Embedding,

    /// The chunk text the vector was computed from.
    text: String,

    /// Source document label.
    source: String,
}

/// A scored search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hit {
    /// Cosine similarity to the query.
    pub score: f32,

    /// The matched chunk text.
    pub text: String,

    /// Source document label.
    pub source: String,
}

/// A vector index for similarity search over one partition's chunks.
///
/// Entries keep their insertion order, so search results are stable for
/// equal scores.
pub struct VectorIndex {
    /// Stored entries.
    entries: Vec<IndexEntry>,

    /// Expected dimension of embeddings.
    dimension: usize,
}

impl VectorIndex {
    /// Create a new index for vectors of the given dimension.
    pub fn new(dimension: usize) -> Self {
        Self {
            entries: Vec::new(),
            dimension,
        }
    }

    /// The dimension this index accepts.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Add a chunk and its embedding to the index.
    pub fn add(
        &mut self,
        text: impl Into<String>,
        source: impl Into<String>,
        mut embedding: Embedding,
    ) -> Result<()> {
        if embedding.len() != self.dimension {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimension,
                actual: embedding.len(),
            });
        }

        normalize(&mut embedding);

        let entry = IndexEntry {
            embedding,
            text: text.into(),
            source: source.into(),
        };

        debug!("Added chunk from {} to index", entry.source);
        self.entries.push(entry);

        Ok(())
    }

    /// Number of chunks in the index.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Search for the k chunks most similar to the query embedding.
    pub fn search(&self, query: &Embedding, k: usize) -> Result<Vec<Hit>> {
        if query.len() != self.dimension {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut query = query.clone();
        normalize(&mut query);

        let candidates: Vec<Embedding> =
            self.entries.iter().map(|e| e.embedding.clone()).collect();

        let top = find_top_k(&query, &candidates, k)?;

        Ok(top
            .into_iter()
            .map(|(position, score)| {
                let entry = &self.entries[position];
                Hit {
                    score,
                    text: entry.text.clone(),
                    source: entry.source.clone(),
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_index_add_and_len() {
        let mut index = VectorIndex::new(3);
        index
            .add("Garen deals 50 damage", "lol_champions.txt", vec![1.0, 0.0, 0.0])
            .unwrap();

        assert_eq!(index.len(), 1);
        assert!(!index.is_empty());
    }

    #[test]
    fn test_index_search_returns_closest_first() {
        let mut index = VectorIndex::new(3);
        index.add("a", "a.txt", vec![1.0, 0.0, 0.0]).unwrap();
        index.add("b", "b.txt", vec![0.0, 1.0, 0.0]).unwrap();
        index.add("c", "c.txt", vec![0.7, 0.7, 0.0]).unwrap();

        let query = vec![1.0, 0.0, 0.0];
        let hits = index.search(&query, 2).unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].text, "a");
        assert_eq!(hits[0].source, "a.txt");
        assert!(hits[0].score >= hits[1].score);
    }

    #[test]
    fn test_index_search_caps_at_len() {
        let mut index = VectorIndex::new(2);
        index.add("only", "only.txt", vec![1.0, 0.0]).unwrap();

        let hits = index.search(&vec![1.0, 0.0], 4).unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_index_rejects_dimension_mismatch() {
        let mut index = VectorIndex::new(3);
        assert!(index.add("bad", "bad.txt", vec![1.0, 0.0]).is_err());
        assert!(index.search(&vec![1.0, 0.0], 1).is_err());
    }
}
