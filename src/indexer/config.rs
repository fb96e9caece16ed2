//! Configuration of an indexing run.
//!
//! # Examples
//!
//! ```no_run
//! use dict_index::indexer::IndexerConfig;
//!
//! # fn main() -> dict_index::Result<()> {
//! // Load configuration from JSON
//! let config = IndexerConfig::from_json_file("indexer.json")?;
//! config.validate()?;
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::Language;
use crate::{DictError, Result};

/// Smallest writer heap tantivy accepts.
pub const MIN_WRITER_MEMORY_BUDGET: usize = 15_000_000;

/// Parameters of one indexing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexerConfig {
    /// Path to the XML export to parse
    pub input_file: String,
    /// Headword language of the export
    pub language: Language,
    /// Directory the index is created in
    pub index_dir: String,
    /// Heap size of the index writer, in bytes (default: 50MB)
    pub writer_memory_budget: usize,
    /// Whether to write one suggestion document per headword
    pub build_suggestions: bool,
    /// Percentage of the input between progress reports
    pub progress_interval_percent: u64,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        IndexerConfig {
            input_file: String::new(),
            language: Language::Hu,
            index_dir: String::new(),
            writer_memory_budget: 50_000_000,
            build_suggestions: true,
            progress_interval_percent: 10,
        }
    }
}

impl IndexerConfig {
    pub fn new(input_file: &str, language: Language, index_dir: &str) -> Self {
        IndexerConfig {
            input_file: input_file.to_string(),
            language,
            index_dir: index_dir.to_string(),
            ..Default::default()
        }
    }

    /// Reads a configuration from a JSON file. Missing keys take their
    /// default values.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json_content = fs::read_to_string(path)?;
        Self::from_json(&json_content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Checks the values before a run starts.
    pub fn validate(&self) -> Result<()> {
        if self.input_file.trim().is_empty() {
            return Err(DictError::config("input_file is empty"));
        }
        if self.index_dir.trim().is_empty() {
            return Err(DictError::config("index_dir is empty"));
        }
        if self.writer_memory_budget < MIN_WRITER_MEMORY_BUDGET {
            return Err(DictError::config(format!(
                "writer_memory_budget must be at least {} bytes, got {}",
                MIN_WRITER_MEMORY_BUDGET, self.writer_memory_budget
            )));
        }
        if self.progress_interval_percent > 100 {
            return Err(DictError::config("progress_interval_percent must not exceed 100"));
        }
        Ok(())
    }

    /// Input path with `~` and environment variables expanded.
    pub fn input_path(&self) -> Result<PathBuf> {
        expand_path(&self.input_file)
    }

    /// Index directory with `~` and environment variables expanded.
    pub fn index_path(&self) -> Result<PathBuf> {
        expand_path(&self.index_dir)
    }
}

fn expand_path(path: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(path)
        .map_err(|e| DictError::config(format!("Cannot expand path {}: {}", path, e)))?;
    Ok(PathBuf::from(expanded.as_ref()))
}
