//! Normalized dictionary entry.
//!
//! An [`EntryRecord`] is what the [`EntryParser`](crate::parser::EntryParser)
//! yields for every completed `entry` element: the searchable word sets plus
//! a formatted display string. Consumers treat it as an opaque value; only the
//! field values matter downstream.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::model::Language;

/// One parsed dictionary entry.
///
/// Sets never hold duplicates. `sort_key` is the first root seen and is absent
/// when the entry has no roots. `id` and `display_text` are written once, when
/// the entry closes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryRecord {
    /// Identifier copied from the `id` attribute of the entry element
    pub id: Option<String>,
    /// Headword language, stamped by the indexing service
    pub language: Option<Language>,
    /// Orthographic headwords
    pub roots: IndexSet<String>,
    /// Inflected forms collected from inflection sequences
    pub forms: IndexSet<String>,
    /// Translations outside usage examples
    pub translations: IndexSet<String>,
    /// Source-language fragments of usage examples
    pub quotations: IndexSet<String>,
    /// Translations of usage examples
    pub quotation_translations: IndexSet<String>,
    /// First root encountered, used for alphabetic sorting
    pub sort_key: Option<String>,
    /// Formatted summary using `<b>` and `<i>` inline markup
    pub display_text: String,
}

impl EntryRecord {
    /// Records a headword. The first one recorded becomes the sort key.
    pub fn add_root(&mut self, root: &str) {
        if self.sort_key.is_none() {
            self.sort_key = Some(root.to_string());
        }
        self.roots.insert(root.to_string());
    }

    /// Stamps the headword language, consuming and returning the record.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// True when the entry carries nothing searchable.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
            && self.forms.is_empty()
            && self.translations.is_empty()
            && self.quotations.is_empty()
            && self.quotation_translations.is_empty()
    }
}
