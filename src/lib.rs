//! # dict-index - Bilingual Dictionary Export Parser and Indexer
//!
//! This crate reads the XML export of a Hungarian-Norwegian dictionary,
//! turns every entry into a normalized record with a ready-to-render display
//! string, and writes the records into a full-text index that can be searched
//! by headword, inflected form, or translation.
//!
//! ## Features
//!
//! - **Streaming parser**: Pulls one entry at a time out of arbitrarily large exports
//! - **Display formatting**: Headword block with inflections, numbered sense groups and senses
//! - **Full-text index**: Per-language fields with accent folding and stemming using Tantivy
//! - **Search**: Headword, form and full-text stages plus prefix suggestions
//!
//! ## Quick Start
//!
//! ### Parsing an Export
//!
//! ```no_run
//! use dict_index::parser::{EntryParser, XmlEventSource};
//!
//! # fn main() -> dict_index::Result<()> {
//! let source = XmlEventSource::from_file("export.xml")?;
//! for entry in EntryParser::new(source) {
//!     let entry = entry?;
//!     println!("{:?}: {}", entry.id, entry.display_text);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Building and Searching an Index
//!
//! ```no_run
//! use dict_index::indexer::{IndexerConfig, IndexService};
//! use dict_index::readers::DictionarySearcher;
//! use dict_index::Language;
//!
//! # fn main() -> dict_index::Result<()> {
//! let config = IndexerConfig::new("export.xml", Language::No, "index");
//! let stats = IndexService::index_file(&config, None)?;
//! println!("{} entries indexed", stats.entries);
//!
//! let searcher = DictionarySearcher::open("index")?;
//! let hits = searcher.search("hus", Some(Language::No), 20)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **Parsing**: [`parser`] for the markup event stream and the entry state machine
//! - **Data model**: [`model`] for entry records and languages
//! - **Indexing**: [`indexer`] for the schema, analyzers and the indexing service
//! - **Searching**: [`readers`] for querying a built index
//! - **Utilities**: [`utils`] for Roman numerals and progress reporting
//!
//! ## Error Handling
//!
//! All fallible operations return a [`Result<T>`] type, where errors are represented by
//! [`DictError`]. The crate uses the `snafu` library for ergonomic error handling with
//! context and backtraces.

pub mod error;
pub mod indexer;
pub mod model;
pub mod parser;
pub mod readers;
pub mod utils;

// Re-export commonly used types for convenience
pub use model::{EntryRecord, Language};
pub use parser::{EntryParser, EventSource, MarkupEvent, XmlEventSource};
pub use indexer::{DictionaryIndexer, IndexService, IndexerConfig};
pub use readers::{DictionarySearcher, SearchHit};

// Re-export error types for convenience
pub use error::{DictError, Result, snafu};
