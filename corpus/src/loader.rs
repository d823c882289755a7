//! Corpus loading and partition routing.
//!
//! The `CorpusLoader` scans the data directory once, reads each knowledge
//! file fully, and routes it into one or more partitions by file name.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::CorpusConfig;
use crate::document::Document;
use crate::error::Result;

/// Summary of a corpus load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadReport {
    /// Candidate files found in the data directory.
    pub files_seen: usize,

    /// Files read successfully.
    pub files_loaded: usize,

    /// Files skipped due to read failures.
    pub files_skipped: usize,

    /// Source file names that were loaded, in scan order.
    pub sources: Vec<String>,

    /// Document count per partition.
    pub documents_per_partition: HashMap<String, usize>,

    /// When the load completed.
    pub loaded_at: DateTime<Utc>,

    /// Time taken in milliseconds.
    pub duration_ms: u64,
}

/// Documents grouped by partition, produced by a single load.
#[derive(Debug, Clone)]
pub struct Corpus {
    /// Partition names in configuration order.
    order: Vec<String>,

    /// Documents per partition.
    partitions: HashMap<String, Vec<Document>>,

    /// Load summary.
    report: LoadReport,
}

impl Corpus {
    /// Partition names in configuration order.
    pub fn partition_names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    /// Documents routed into a partition, empty for unknown names.
    pub fn documents(&self, partition: &str) -> &[Document] {
        self.partitions.get(partition).map_or(&[], Vec::as_slice)
    }

    /// Whether no files were loaded at all.
    pub fn is_empty(&self) -> bool {
        self.report.files_loaded == 0
    }

    /// The load summary.
    pub fn report(&self) -> &LoadReport {
        &self.report
    }
}

/// Loads and classifies the knowledge corpus.
pub struct CorpusLoader {
    /// Configuration.
    config: CorpusConfig,
}

impl CorpusLoader {
    /// Create a loader for the given configuration.
    pub fn new(config: CorpusConfig) -> Self {
        Self { config }
    }

    /// The loader's configuration.
    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }

    /// Scan the data directory and load every matching file.
    ///
    /// A missing data directory yields an empty corpus for every configured
    /// partition. Individual unreadable files are logged and skipped, never
    /// aborting the load.
    pub async fn load(&self) -> Result<Corpus> {
        self.config.validate()?;

        let start = std::time::Instant::now();
        let order: Vec<String> = self
            .config
            .partitions
            .iter()
            .map(|p| p.name.clone())
            .collect();
        let mut partitions: HashMap<String, Vec<Document>> = order
            .iter()
            .map(|name| (name.clone(), Vec::new()))
            .collect();

        let mut files_seen = 0;
        let mut files_skipped = 0;
        let mut sources = Vec::new();

        if !self.config.data_dir.is_dir() {
            info!(
                "Data directory {} not found, starting with an empty corpus",
                self.config.data_dir.display()
            );
            return Ok(self.finish(order, partitions, 0, 0, sources, start));
        }

        // Top-level files only, in file-name order so loads are deterministic.
        let walker = WalkDir::new(&self.config.data_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Failed to scan directory entry: {e}");
                    files_skipped += 1;
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let matches_extension = path
                .extension()
                .map_or(false, |ext| ext.eq_ignore_ascii_case(&self.config.extension));
            if !matches_extension {
                continue;
            }

            files_seen += 1;
            let file_name = entry.file_name().to_string_lossy().to_string();

            let content = match fs::read_to_string(path).await {
                Ok(content) => content,
                Err(e) => {
                    warn!("Failed to read {file_name}: {e}");
                    files_skipped += 1;
                    continue;
                }
            };

            let targets: Vec<String> = self
                .config
                .classify(&file_name)
                .into_iter()
                .map(str::to_string)
                .collect();
            debug!("Loaded {file_name} into partitions {targets:?}");

            let document = Document::new(&file_name, content, targets.clone());
            for target in &targets {
                if let Some(docs) = partitions.get_mut(target) {
                    docs.push(document.clone());
                }
            }
            sources.push(file_name);
        }

        let corpus = self.finish(order, partitions, files_seen, files_skipped, sources, start);
        info!(
            "Loaded {} files into {} partitions ({files_skipped} skipped)",
            corpus.report.files_loaded,
            corpus.order.len()
        );
        Ok(corpus)
    }

    fn finish(
        &self,
        order: Vec<String>,
        partitions: HashMap<String, Vec<Document>>,
        files_seen: usize,
        files_skipped: usize,
        sources: Vec<String>,
        start: std::time::Instant,
    ) -> Corpus {
        let documents_per_partition = partitions
            .iter()
            .map(|(name, docs)| (name.clone(), docs.len()))
            .collect();

        let report = LoadReport {
            files_seen,
            files_loaded: sources.len(),
            files_skipped,
            sources,
            documents_per_partition,
            loaded_at: Utc::now(),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        Corpus {
            order,
            partitions,
            report,
        }
    }
}
