// Output value types of the entry parser
//
// This module holds the normalized entry record produced for every dictionary
// entry and the language tag the indexing service attaches to it.

pub mod entry;
pub mod language;

pub use entry::EntryRecord;
pub use language::Language;
