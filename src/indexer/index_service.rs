//! Parse-and-index pipeline.
//!
//! Streams entries out of an XML export and writes each one to a
//! [`DictionaryIndexer`] as soon as it is parsed, so memory use does not grow
//! with the size of the export.

use std::fs;

use log::info;

use crate::indexer::{DictionaryIndexer, IndexStats, IndexerConfig};
use crate::model::Language;
use crate::parser::{EntryParser, EventSource, XmlEventSource};
use crate::utils::{ProgressReportFn, ProgressState};
use crate::{DictError, Result};

pub struct IndexService;

impl IndexService {
    /// Builds a fresh index from the export named in `config`.
    ///
    /// Any existing index in the target directory is replaced. The optional
    /// `progress` callback is called every `progress_interval_percent` of the
    /// input bytes; returning `true` from it aborts the run with
    /// [`DictError::UserInterrupted`]. Entries written before the abort are
    /// not committed.
    pub fn index_file(config: &IndexerConfig, progress: Option<ProgressReportFn>) -> Result<IndexStats> {
        config.validate()?;
        let input = config.input_path()?;
        let index_dir = config.index_path()?;
        info!(
            "Indexing {} ({} headwords) into {}",
            input.display(),
            config.language,
            index_dir.display()
        );

        let total = fs::metadata(&input)?.len();
        let mut progress_state = ProgressState::new(
            "IndexService::index_file",
            total,
            config.progress_interval_percent,
            progress,
        );

        let mut indexer = DictionaryIndexer::create(&index_dir, config.writer_memory_budget)?;
        indexer.set_build_suggestions(config.build_suggestions);

        let mut parser = EntryParser::new(XmlEventSource::from_file(&input)?);
        while let Some(entry) = parser.next_entry()? {
            indexer.write(&entry.with_language(config.language))?;
            progress_state.entries = parser.entries_parsed();
            if progress_state.report(parser.source().position()) {
                return Err(DictError::user_interrupted());
            }
        }
        progress_state.entries = parser.entries_parsed();
        if progress_state.finish() {
            return Err(DictError::user_interrupted());
        }

        let (_, stats) = indexer.finish()?;
        Ok(stats)
    }

    /// Parses every entry of `source`, tags it with `language` and writes it
    /// to `indexer`. Does not commit.
    ///
    /// Returns the number of entries written.
    pub fn index_events<S: EventSource>(
        source: S,
        language: Language,
        indexer: &mut DictionaryIndexer,
    ) -> Result<u64> {
        let mut parser = EntryParser::new(source);
        while let Some(entry) = parser.next_entry()? {
            indexer.write(&entry.with_language(language))?;
        }
        Ok(parser.entries_parsed())
    }
}
