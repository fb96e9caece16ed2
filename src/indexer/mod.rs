// Full-text indexing of parsed entries
//
// This module maps entry records onto the tantivy schema, registers the
// analyzers the fields are tokenized with, and drives a complete
// parse-and-index run from a configuration.

pub mod analyzer;
pub mod config;
pub mod dictionary_indexer;
pub mod field_names;
pub mod index_service;

pub use analyzer::{build_schema, register_analyzers};
pub use config::IndexerConfig;
pub use dictionary_indexer::{DictionaryIndexer, IndexStats};
pub use field_names::FieldSet;
pub use index_service::IndexService;
