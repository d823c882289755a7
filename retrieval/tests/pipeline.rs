//! Integration tests for the partitioned retrieval pipeline.
//!
//! This suite verifies the full path from a directory of knowledge files
//! to rendered query context, using the deterministic hash embedder so no
//! network access is needed.

use std::sync::Arc;

use async_trait::async_trait;
use nexus_embeddings::{Embedder, Embedding, EmbeddingError, HashEmbedder};
use nexus_retrieval::{KnowledgeBase, RetrievalError, SplitterConfig};
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, content: &str) {
    std::fs::write(dir.path().join(name), content).unwrap();
}

fn hash_base(dir: &TempDir) -> KnowledgeBase {
    KnowledgeBase::builder()
        .with_data_dir(dir.path())
        .with_embedder(Arc::new(HashEmbedder::new().with_dimension(128)))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_keyword_routing_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    write_file(&temp_dir, "lol_champions.txt", "Garen deals 50 damage");
    write_file(&temp_dir, "tft_traits.txt", "Yone trait grants shield");
    write_file(&temp_dir, "notes.txt", "shared fact");

    let base = hash_base(&temp_dir);
    let stats = base.stats().await.unwrap();

    // The unmatched file lands in both partitions; keyworded files in one.
    assert_eq!(stats.documents_per_partition["lol"], 2);
    assert_eq!(stats.documents_per_partition["tft"], 2);
    assert_eq!(stats.files_loaded, 3);

    // Champion data is retrievable from the lol partition.
    let context = base.context_for("lol", "How much damage does Garen deal?").await.unwrap();
    assert!(context.contains("Garen deals 50 damage"));
    assert!(context.contains("--- [source: lol_champions.txt] ---"));

    // The tft partition never sees lol-only sources.
    let context = base.query("tft", "shield trait").await.unwrap();
    assert!(
        context.hits().iter().all(|hit| hit.source != "lol_champions.txt"),
        "lol-only document leaked into the tft partition"
    );
}

#[tokio::test]
async fn test_empty_directory_degrades_to_sentinel() {
    let temp_dir = TempDir::new().unwrap();
    let base = hash_base(&temp_dir);

    for partition in ["lol", "tft"] {
        let rendered = base.context_for(partition, "anything at all").await.unwrap();
        assert_eq!(rendered, "no data available");
    }
}

#[tokio::test]
async fn test_missing_directory_degrades_to_sentinel() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("never-created");

    let base = KnowledgeBase::builder()
        .with_data_dir(&missing)
        .with_embedder(Arc::new(HashEmbedder::new().with_dimension(128)))
        .build()
        .unwrap();

    let rendered = base.context_for("lol", "anything").await.unwrap();
    assert_eq!(rendered, "no data available");
    assert!(!missing.exists(), "loading must not create the directory");
}

#[tokio::test]
async fn test_long_document_is_chunked_with_overlap() {
    let content: String = (0..2500).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
    let temp_dir = TempDir::new().unwrap();
    write_file(&temp_dir, "lol_patch_notes.txt", &content);

    let base = hash_base(&temp_dir);
    let stats = base.stats().await.unwrap();

    // 2500 characters at size 1000 / overlap 200: windows 0..1000,
    // 800..1800, 1600..2500.
    assert_eq!(stats.chunks_per_partition["lol"], 3);

    let context = base.query_top("lol", &content[..100], 3).await.unwrap();
    let lengths: Vec<usize> = context.hits().iter().map(|hit| hit.text.len()).collect();
    let mut sorted = lengths.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, vec![900, 1000, 1000]);
}

#[tokio::test]
async fn test_query_returns_at_most_k_ordered_hits() {
    let temp_dir = TempDir::new().unwrap();
    write_file(
        &temp_dir,
        "tft_economy.txt",
        &"Gold interest accrues at ten gold per bracket. ".repeat(60),
    );

    let base = KnowledgeBase::builder()
        .with_data_dir(temp_dir.path())
        .with_splitter(SplitterConfig::new(200, 40))
        .with_top_k(4)
        .with_embedder(Arc::new(HashEmbedder::new().with_dimension(128)))
        .build()
        .unwrap();

    let context = base.query("tft", "gold interest").await.unwrap();
    let hits = context.hits();

    assert_eq!(hits.len(), 4);
    for pair in hits.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

/// Always fails, standing in for an exhausted embedding API.
struct BrokenEmbedder;

#[async_trait]
impl Embedder for BrokenEmbedder {
    fn name(&self) -> &str {
        "broken"
    }

    fn dimension(&self) -> usize {
        8
    }

    fn is_available(&self) -> bool {
        false
    }

    async fn embed(&self, _text: &str) -> nexus_embeddings::Result<Embedding> {
        Err(EmbeddingError::ApiRequest("simulated outage".to_string()))
    }
}

#[tokio::test]
async fn test_embedding_failure_surfaces_and_leaves_no_index() {
    let temp_dir = TempDir::new().unwrap();
    write_file(&temp_dir, "lol_champions.txt", "Garen deals 50 damage");

    let base = KnowledgeBase::builder()
        .with_data_dir(temp_dir.path())
        .with_embedder(Arc::new(BrokenEmbedder))
        .build()
        .unwrap();

    let err = base.query("lol", "Garen").await.unwrap_err();
    assert!(matches!(err, RetrievalError::Embedding(_)));

    // The failed build must not leave a partial index behind.
    assert!(!base.is_built().await);
    let err = base.stats().await.unwrap_err();
    assert!(matches!(err, RetrievalError::Embedding(_)));
}
