// Dictionary index readers
//
// This module provides the query side of an index written by the indexer:
// staged headword, form and full-text search plus headword suggestions.

pub mod dictionary_searcher;

pub use dictionary_searcher::{DictionarySearcher, SearchHit};
