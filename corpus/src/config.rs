//! Configuration types for corpus loading.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{CorpusError, Result};

/// A named partition and the filename keywords that route documents into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionSpec {
    /// Partition name, used as the lookup key at query time.
    pub name: String,

    /// Case-insensitive substrings matched against file names.
    pub keywords: Vec<String>,
}

impl PartitionSpec {
    /// Create a partition spec with a single keyword equal to its name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            keywords: vec![name.clone()],
            name,
        }
    }

    /// Add a routing keyword.
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.push(keyword.into());
        self
    }

    /// Check whether a file name routes into this partition.
    pub fn matches(&self, file_name: &str) -> bool {
        let lower = file_name.to_lowercase();
        self.keywords
            .iter()
            .any(|k| lower.contains(&k.to_lowercase()))
    }
}

/// Configuration for the corpus loader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Directory containing the scraped knowledge files.
    pub data_dir: PathBuf,

    /// File extension to load (without the leading dot).
    pub extension: String,

    /// Partition table, evaluated in order.
    pub partitions: Vec<PartitionSpec>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            extension: "txt".to_string(),
            partitions: vec![PartitionSpec::new("lol"), PartitionSpec::new("tft")],
        }
    }
}

impl CorpusConfig {
    /// Create a config for the given data directory with default partitions.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    /// Set the file extension to load.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Replace the partition table.
    pub fn with_partitions(mut self, partitions: Vec<PartitionSpec>) -> Self {
        self.partitions = partitions;
        self
    }

    /// Add a partition to the table.
    pub fn add_partition(mut self, partition: PartitionSpec) -> Self {
        self.partitions.push(partition);
        self
    }

    /// Partition names in configuration order.
    pub fn partition_names(&self) -> Vec<&str> {
        self.partitions.iter().map(|p| p.name.as_str()).collect()
    }

    /// Resolve the partitions a file name routes into.
    ///
    /// Partitions are evaluated in configuration order. A file name that
    /// matches no keyword routes into every partition, so unclassified
    /// knowledge is never dropped.
    pub fn classify(&self, file_name: &str) -> Vec<&str> {
        let matched: Vec<&str> = self
            .partitions
            .iter()
            .filter(|p| p.matches(file_name))
            .map(|p| p.name.as_str())
            .collect();

        if matched.is_empty() {
            self.partition_names()
        } else {
            matched
        }
    }

    /// Validate the partition table.
    pub fn validate(&self) -> Result<()> {
        if self.partitions.is_empty() {
            return Err(CorpusError::InvalidConfig(
                "at least one partition is required".to_string(),
            ));
        }
        let mut seen = std::collections::HashSet::new();
        for partition in &self.partitions {
            if partition.name.is_empty() {
                return Err(CorpusError::InvalidConfig(
                    "partition name must not be empty".to_string(),
                ));
            }
            if !seen.insert(partition.name.as_str()) {
                return Err(CorpusError::InvalidConfig(format!(
                    "duplicate partition name: {}",
                    partition.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    #[test]
    fn test_corpus_config_creation() {
        let config = CorpusConfig::new("/srv/nexus/data")
            .with_extension("md")
            .add_partition(PartitionSpec::new("arena"));

        assert_eq!(config.data_dir, Path::new("/srv/nexus/data"));
        assert_eq!(config.extension, "md");
        assert_eq!(config.partition_names(), vec!["lol", "tft", "arena"]);
    }

    #[test]
    fn test_partition_matching_is_case_insensitive() {
        let partition = PartitionSpec::new("lol").with_keyword("league");

        assert!(partition.matches("LoL_champions.txt"));
        assert!(partition.matches("League_patch_notes.txt"));
        assert!(!partition.matches("tft_traits.txt"));
    }

    #[test]
    fn test_classify_routes_matches_in_config_order() {
        let config = CorpusConfig::default();

        assert_eq!(config.classify("lol_champions.txt"), vec!["lol"]);
        assert_eq!(config.classify("tft_traits.txt"), vec!["tft"]);
        assert_eq!(config.classify("lol_tft_crossover.txt"), vec!["lol", "tft"]);
    }

    #[test]
    fn test_classify_falls_back_to_all_partitions() {
        let config = CorpusConfig::default();

        assert_eq!(config.classify("notes.txt"), vec!["lol", "tft"]);
    }

    #[test]
    fn test_validate_rejects_duplicate_names() {
        let config = CorpusConfig::default().add_partition(PartitionSpec::new("lol"));

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_table() {
        let config = CorpusConfig::default().with_partitions(Vec::new());

        assert!(config.validate().is_err());
    }
}
