//! Writes parsed entries into a tantivy index.
//!
//! Every entry becomes one document carrying its words in the fields of its
//! headword language (see [`field_names`](crate::indexer::field_names)).
//! Each headword additionally gets a small suggestion document used for
//! prefix completion.

use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::Serialize;
use tantivy::schema::{Field, Schema};
use tantivy::{Index, IndexWriter, TantivyDocument};

use crate::indexer::analyzer::{build_schema, register_analyzers};
use crate::indexer::config::MIN_WRITER_MEMORY_BUDGET;
use crate::indexer::field_names::{self, FieldSet};
use crate::model::{EntryRecord, Language};
use crate::{DictError, Result};

/// Counts of documents written by an indexing run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Entry documents
    pub entries: u64,
    /// Suggestion documents, one per headword
    pub suggestions: u64,
}

/// Field handles of one headword language.
struct LanguageFields {
    roots: Field,
    roots_lc: Field,
    forms: Field,
    trans: Field,
    quote: Field,
    quote_trans: Field,
}

impl LanguageFields {
    fn resolve(schema: &Schema, names: &FieldSet) -> Result<Self> {
        Ok(Self {
            roots: schema.get_field(names.roots)?,
            roots_lc: schema.get_field(names.roots_lc)?,
            forms: schema.get_field(names.forms)?,
            trans: schema.get_field(names.trans)?,
            quote: schema.get_field(names.quote)?,
            quote_trans: schema.get_field(names.quote_trans)?,
        })
    }
}

/// Handles of every field the indexer writes.
pub struct IndexFields {
    lang: Field,
    id: Field,
    sort: Field,
    text: Field,
    suggestion: Field,
    hu: LanguageFields,
    no: LanguageFields,
}

impl IndexFields {
    pub fn resolve(schema: &Schema) -> Result<Self> {
        Ok(Self {
            lang: schema.get_field(field_names::LANG)?,
            id: schema.get_field(field_names::ID)?,
            sort: schema.get_field(field_names::SORT)?,
            text: schema.get_field(field_names::TEXT)?,
            suggestion: schema.get_field(field_names::SUGGESTION)?,
            hu: LanguageFields::resolve(schema, FieldSet::for_language(Language::Hu))?,
            no: LanguageFields::resolve(schema, FieldSet::for_language(Language::No))?,
        })
    }

    fn for_language(&self, language: Language) -> &LanguageFields {
        match language {
            Language::Hu => &self.hu,
            Language::No => &self.no,
        }
    }
}

/// Adds entries to an index and commits them.
pub struct DictionaryIndexer {
    index: Index,
    writer: IndexWriter,
    fields: IndexFields,
    build_suggestions: bool,
    stats: IndexStats,
}

impl DictionaryIndexer {
    /// Creates a fresh index in `index_dir`, replacing whatever was there.
    pub fn create(index_dir: &Path, writer_memory_budget: usize) -> Result<Self> {
        if index_dir.exists() {
            warn!("Replacing existing index at: {}", index_dir.display());
            fs::remove_dir_all(index_dir)?;
        }
        fs::create_dir_all(index_dir)?;
        let index = Index::create_in_dir(index_dir, build_schema())?;
        info!("Created index at: {}", index_dir.display());
        Self::from_index(index, writer_memory_budget)
    }

    /// Creates an index held in memory.
    pub fn create_in_ram(writer_memory_budget: usize) -> Result<Self> {
        Self::from_index(Index::create_in_ram(build_schema()), writer_memory_budget)
    }

    /// Opens an existing index to append entries to it.
    pub fn open(index_dir: &Path, writer_memory_budget: usize) -> Result<Self> {
        let index = Index::open_in_dir(index_dir)?;
        info!("Opened index at: {}", index_dir.display());
        Self::from_index(index, writer_memory_budget)
    }

    pub fn from_index(index: Index, writer_memory_budget: usize) -> Result<Self> {
        if writer_memory_budget < MIN_WRITER_MEMORY_BUDGET {
            return Err(DictError::config(format!(
                "writer_memory_budget must be at least {} bytes",
                MIN_WRITER_MEMORY_BUDGET
            )));
        }
        register_analyzers(&index);
        let fields = IndexFields::resolve(&index.schema())?;
        let writer = index.writer(writer_memory_budget)?;
        Ok(Self {
            index,
            writer,
            fields,
            build_suggestions: true,
            stats: IndexStats::default(),
        })
    }

    /// Turns suggestion documents on or off for following writes.
    pub fn set_build_suggestions(&mut self, build_suggestions: bool) {
        self.build_suggestions = build_suggestions;
    }

    pub fn stats(&self) -> IndexStats {
        self.stats
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Adds one entry, plus a suggestion document per headword.
    ///
    /// An entry without a language is written to the Hungarian fields and
    /// gets no `lang` value.
    pub fn write(&mut self, entry: &EntryRecord) -> Result<()> {
        let document = self.to_document(entry);
        self.writer.add_document(document)?;
        self.stats.entries += 1;

        if self.build_suggestions {
            for root in &entry.roots {
                let mut suggestion = TantivyDocument::default();
                suggestion.add_text(self.fields.sort, root);
                suggestion.add_text(self.fields.suggestion, root);
                self.writer.add_document(suggestion)?;
                self.stats.suggestions += 1;
            }
        }
        Ok(())
    }

    fn to_document(&self, entry: &EntryRecord) -> TantivyDocument {
        let fields = &self.fields;
        let lang_fields = fields.for_language(entry.language.unwrap_or(Language::Hu));
        let mut document = TantivyDocument::default();

        if let Some(language) = entry.language {
            document.add_text(fields.lang, language.code());
        }
        if let Some(id) = &entry.id {
            document.add_text(fields.id, id);
        }
        for root in &entry.roots {
            document.add_text(lang_fields.roots, root);
            document.add_text(lang_fields.roots_lc, root);
        }
        for form in &entry.forms {
            document.add_text(lang_fields.forms, form);
        }
        for trans in &entry.translations {
            document.add_text(lang_fields.trans, trans);
        }
        for quote in &entry.quotations {
            document.add_text(lang_fields.quote, quote);
        }
        for quote_trans in &entry.quotation_translations {
            document.add_text(lang_fields.quote_trans, quote_trans);
        }
        if let Some(sort_key) = &entry.sort_key {
            document.add_text(fields.sort, sort_key);
        }
        document.add_text(fields.text, &entry.display_text);
        document
    }

    /// Makes everything written so far visible to searchers.
    pub fn commit(&mut self) -> Result<()> {
        info!("Committing index...");
        self.writer.commit()?;
        Ok(())
    }

    /// Commits, waits for background merges and releases the writer lock.
    pub fn finish(mut self) -> Result<(Index, IndexStats)> {
        self.commit()?;
        let Self { index, writer, stats, .. } = self;
        writer.wait_merging_threads()?;
        info!(
            "Indexed {} entries and {} suggestions",
            stats.entries, stats.suggestions
        );
        Ok((index, stats))
    }
}
