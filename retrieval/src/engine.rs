//! Knowledge base implementation.
//!
//! The `KnowledgeBase` is the process-wide cached retrieval resource: it
//! loads the corpus once, builds one vector index per non-empty partition,
//! and answers similarity queries until it is explicitly invalidated.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use nexus_corpus::{CorpusLoader, LoadReport, PartitionSpec};
use nexus_embeddings::{Embedder, EmbeddingError, Hit, VectorIndex};

use crate::config::RetrievalConfig;
use crate::error::{Result, RetrievalError};
use crate::splitter::{SplitterConfig, TextSplitter};

/// Result of a retrieval query against one partition.
#[derive(Debug, Clone)]
pub enum RetrievedContext {
    /// The partition has no indexed documents.
    NoData,

    /// Scored chunks, ordered by non-increasing similarity.
    Snippets(Vec<Hit>),
}

impl RetrievedContext {
    /// Context string returned when a partition has no data.
    pub const NO_DATA: &'static str = "no data available";

    /// Whether this result carries no snippets.
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData)
    }

    /// The retrieved snippets, empty for the no-data sentinel.
    pub fn hits(&self) -> &[Hit] {
        match self {
            Self::NoData => &[],
            Self::Snippets(hits) => hits,
        }
    }

    /// Render the result as a single prompt-ready context string.
    ///
    /// Each snippet is prefixed with a source header, the same labeling the
    /// loaded knowledge files carry in the assistant prompt. The no-data
    /// sentinel renders as a fixed marker string instead of an error.
    pub fn render(&self) -> String {
        match self {
            Self::NoData => Self::NO_DATA.to_string(),
            Self::Snippets(hits) => hits
                .iter()
                .map(|hit| format!("--- [source: {}] ---\n{}", hit.source, hit.text))
                .collect::<Vec<_>>()
                .join("\n\n"),
        }
    }
}

/// Statistics about a built knowledge base.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeStats {
    /// Files read successfully during the load.
    pub files_loaded: usize,

    /// Files skipped due to read failures.
    pub files_skipped: usize,

    /// Document count per partition.
    pub documents_per_partition: HashMap<String, usize>,

    /// Indexed chunk count per partition.
    pub chunks_per_partition: HashMap<String, usize>,

    /// Number of partitions with a built index.
    pub indexed_partitions: usize,

    /// Total chunks across all partitions.
    pub total_chunks: usize,

    /// When the build completed.
    pub built_at: DateTime<Utc>,
}

/// Everything produced by one successful build.
struct BuiltState {
    /// One index per non-empty partition.
    indexes: HashMap<String, VectorIndex>,

    /// Chunk count per indexed partition.
    chunks_per_partition: HashMap<String, usize>,

    /// The corpus load summary.
    report: LoadReport,

    /// When the build completed.
    built_at: DateTime<Utc>,
}

/// Partitioned retrieval over the knowledge corpus.
///
/// The base is built lazily on first use and cached for the lifetime of the
/// process. Two simultaneous first queries build exactly once; `invalidate`
/// and `rebuild` are the only ways to discard a built state. A failed build
/// never installs a partial index: queries either see the previous complete
/// state or the build error.
pub struct KnowledgeBase {
    /// Configuration.
    config: RetrievalConfig,

    /// Chunk splitter derived from the configuration.
    splitter: TextSplitter,

    /// Injected embedding provider.
    embedder: Arc<dyn Embedder>,

    /// The built state, absent until the first successful build.
    state: RwLock<Option<Arc<BuiltState>>>,

    /// Serializes builds so concurrent first queries build once.
    build_lock: Mutex<()>,
}

impl std::fmt::Debug for KnowledgeBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnowledgeBase")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl KnowledgeBase {
    /// Create a new knowledge base builder.
    pub fn builder() -> KnowledgeBaseBuilder {
        KnowledgeBaseBuilder::new()
    }

    /// Create a knowledge base with the given configuration and embedder.
    pub fn new(config: RetrievalConfig, embedder: Arc<dyn Embedder>) -> Result<Self> {
        config.validate()?;
        let splitter = TextSplitter::new(config.splitter)?;

        Ok(Self {
            config,
            splitter,
            embedder,
            state: RwLock::new(None),
            build_lock: Mutex::new(()),
        })
    }

    /// The knowledge base configuration.
    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Whether a build has completed since the last invalidation.
    pub async fn is_built(&self) -> bool {
        self.state.read().await.is_some()
    }

    /// Build the knowledge base now instead of on the first query.
    pub async fn ensure_built(&self) -> Result<()> {
        self.snapshot().await?;
        Ok(())
    }

    /// Drop the built state. The next query triggers a fresh build.
    pub async fn invalidate(&self) {
        let _guard = self.build_lock.lock().await;
        *self.state.write().await = None;
        info!("Knowledge base invalidated");
    }

    /// Rebuild from the source directory.
    ///
    /// The new state is installed only on full success; a failed rebuild
    /// leaves the previously built state in place.
    pub async fn rebuild(&self) -> Result<()> {
        let _guard = self.build_lock.lock().await;
        let built = Arc::new(self.build_state().await?);
        *self.state.write().await = Some(built);
        Ok(())
    }

    /// Query a partition with the configured result count.
    pub async fn query(&self, partition: &str, query_text: &str) -> Result<RetrievedContext> {
        self.query_top(partition, query_text, self.config.top_k).await
    }

    /// Query a partition for the k most similar chunks.
    ///
    /// A partition with no index, configured-but-empty or entirely unknown,
    /// yields the no-data sentinel rather than an error. Embedding failures
    /// propagate.
    pub async fn query_top(
        &self,
        partition: &str,
        query_text: &str,
        k: usize,
    ) -> Result<RetrievedContext> {
        let state = self.snapshot().await?;

        let Some(index) = state.indexes.get(partition) else {
            debug!("No index for partition {partition}, returning no-data sentinel");
            return Ok(RetrievedContext::NoData);
        };

        let embedding = self.embedder.embed(query_text).await?;
        let hits = index.search(&embedding, k)?;

        debug!(
            "Query against partition {partition} returned {} of {} chunks",
            hits.len(),
            index.len()
        );
        Ok(RetrievedContext::Snippets(hits))
    }

    /// Retrieve and render the context string for a query.
    ///
    /// This is the single output handed to the chat completion call.
    pub async fn context_for(&self, partition: &str, query_text: &str) -> Result<String> {
        let context = self.query(partition, query_text).await?;
        Ok(context.render())
    }

    /// Statistics for the built state, building first if needed.
    pub async fn stats(&self) -> Result<KnowledgeStats> {
        let state = self.snapshot().await?;

        Ok(KnowledgeStats {
            files_loaded: state.report.files_loaded,
            files_skipped: state.report.files_skipped,
            documents_per_partition: state.report.documents_per_partition.clone(),
            chunks_per_partition: state.chunks_per_partition.clone(),
            indexed_partitions: state.indexes.len(),
            total_chunks: state.chunks_per_partition.values().sum(),
            built_at: state.built_at,
        })
    }

    /// Get the built state, building it single-flight on first use.
    async fn snapshot(&self) -> Result<Arc<BuiltState>> {
        if let Some(state) = self.state.read().await.as_ref() {
            return Ok(Arc::clone(state));
        }

        let _guard = self.build_lock.lock().await;

        // Another first query may have built while we waited for the lock.
        if let Some(state) = self.state.read().await.as_ref() {
            return Ok(Arc::clone(state));
        }

        let built = Arc::new(self.build_state().await?);
        *self.state.write().await = Some(Arc::clone(&built));
        Ok(built)
    }

    /// Load the corpus and build one index per non-empty partition.
    async fn build_state(&self) -> Result<BuiltState> {
        info!(
            "Building knowledge base from {}",
            self.config.corpus.data_dir.display()
        );

        let loader = CorpusLoader::new(self.config.corpus.clone());
        let corpus = loader.load().await?;

        let mut indexes = HashMap::new();
        let mut chunks_per_partition = HashMap::new();

        for partition in corpus.partition_names() {
            let documents = corpus.documents(partition);
            if documents.is_empty() {
                debug!("Partition {partition} has no documents, skipping index");
                continue;
            }

            let chunks: Vec<_> = documents
                .iter()
                .flat_map(|doc| self.splitter.split_document(doc))
                .collect();
            let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();

            let embeddings = self.embedder.embed_batch(&texts).await?;
            if embeddings.len() != chunks.len() {
                return Err(RetrievalError::Embedding(EmbeddingError::InvalidResponse(
                    format!(
                        "expected {} embeddings for partition {partition}, got {}",
                        chunks.len(),
                        embeddings.len()
                    ),
                )));
            }

            let mut index = VectorIndex::new(self.embedder.dimension());
            for (chunk, embedding) in chunks.into_iter().zip(embeddings) {
                index.add(chunk.text, chunk.source, embedding)?;
            }

            debug!("Indexed {} chunks for partition {partition}", index.len());
            chunks_per_partition.insert(partition.to_string(), index.len());
            indexes.insert(partition.to_string(), index);
        }

        info!(
            "Knowledge base built: {} partitions indexed, {} chunks total",
            indexes.len(),
            chunks_per_partition.values().sum::<usize>()
        );

        Ok(BuiltState {
            indexes,
            chunks_per_partition,
            report: corpus.report().clone(),
            built_at: Utc::now(),
        })
    }
}

/// Builder for the knowledge base.
pub struct KnowledgeBaseBuilder {
    config: RetrievalConfig,
    embedder: Option<Arc<dyn Embedder>>,
}

impl KnowledgeBaseBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: RetrievalConfig::default(),
            embedder: None,
        }
    }

    /// Set the full configuration.
    pub fn with_config(mut self, config: RetrievalConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<std::path::PathBuf>) -> Self {
        self.config.corpus.data_dir = dir.into();
        self
    }

    /// Set the splitter configuration.
    pub fn with_splitter(mut self, splitter: SplitterConfig) -> Self {
        self.config.splitter = splitter;
        self
    }

    /// Set the default result count per query.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.config.top_k = top_k;
        self
    }

    /// Add a partition to the corpus configuration.
    pub fn with_partition(mut self, partition: PartitionSpec) -> Self {
        self.config = self.config.add_partition(partition);
        self
    }

    /// Set the embedding provider.
    pub fn with_embedder(mut self, embedder: Arc<dyn Embedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Build the knowledge base.
    ///
    /// The corpus itself is loaded lazily on the first query, not here.
    pub fn build(self) -> Result<KnowledgeBase> {
        let embedder = self.embedder.ok_or_else(|| {
            RetrievalError::Config("an embedding provider is required".to_string())
        })?;
        KnowledgeBase::new(self.config, embedder)
    }
}

impl Default for KnowledgeBaseBuilder {
    fn default() -> Self {
        Self::new()
    }
}
