//! Text analysis for the dictionary index.
//!
//! Headwords and forms are matched accent-insensitively ("folding"), the
//! `_lc` root fields keep accents, and translations and quotations are
//! stemmed in the language they are written in. Custom analyzers are not
//! persisted by tantivy, so [`register_analyzers`] must run on every index
//! that is opened or created.

use tantivy::Index;
use tantivy::schema::{FAST, IndexRecordOption, Schema, STORED, STRING, TEXT, TextFieldIndexing, TextOptions};
use tantivy::tokenizer::{
    AsciiFoldingFilter, Language as StemmerLanguage, LowerCaser, RemoveLongFilter, SimpleTokenizer,
    Stemmer, TextAnalyzer,
};

use crate::indexer::field_names::{self, FieldSet};

pub const FOLDING: &str = "folding";
pub const LOWERCASE: &str = "lowercase";
pub const HU_STEM: &str = "hu_stem";
pub const NO_STEM: &str = "no_stem";

const MAX_TOKEN_LEN: usize = 40;

/// Registers the custom analyzers on `index`.
pub fn register_analyzers(index: &Index) {
    let tokenizers = index.tokenizers();
    tokenizers.register(
        FOLDING,
        TextAnalyzer::builder(SimpleTokenizer::default())
            .filter(RemoveLongFilter::limit(MAX_TOKEN_LEN))
            .filter(LowerCaser)
            .filter(AsciiFoldingFilter)
            .build(),
    );
    tokenizers.register(
        LOWERCASE,
        TextAnalyzer::builder(SimpleTokenizer::default())
            .filter(RemoveLongFilter::limit(MAX_TOKEN_LEN))
            .filter(LowerCaser)
            .build(),
    );
    tokenizers.register(HU_STEM, stemming(StemmerLanguage::Hungarian));
    tokenizers.register(NO_STEM, stemming(StemmerLanguage::Norwegian));
}

fn stemming(language: StemmerLanguage) -> TextAnalyzer {
    TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(RemoveLongFilter::limit(MAX_TOKEN_LEN))
        .filter(LowerCaser)
        .filter(Stemmer::new(language))
        .build()
}

/// Analyzer used for a per-language or suggestion field.
///
/// Returns `None` for fields that are stored or matched verbatim.
pub fn analyzer_for(field: &str) -> Option<&'static str> {
    match field {
        field_names::HU_ROOTS | field_names::NO_ROOTS => Some(FOLDING),
        field_names::HU_ROOTS_LC | field_names::NO_ROOTS_LC => Some(LOWERCASE),
        field_names::HU_FORMS | field_names::NO_FORMS => Some(FOLDING),
        field_names::SUGGESTION => Some(FOLDING),
        // Norwegian entries translate into Hungarian and vice versa
        field_names::NO_TRANS | field_names::HU_QUOTE | field_names::NO_QUOTETRANS => Some(HU_STEM),
        field_names::HU_TRANS | field_names::NO_QUOTE | field_names::HU_QUOTETRANS => Some(NO_STEM),
        _ => None,
    }
}

fn text_options(tokenizer: &str, stored: bool) -> TextOptions {
    let indexing = TextFieldIndexing::default()
        .set_tokenizer(tokenizer)
        .set_index_option(IndexRecordOption::WithFreqsAndPositions);
    let options = TextOptions::default().set_indexing_options(indexing);
    if stored { options.set_stored() } else { options }
}

/// Whether a per-language field keeps its original value in the index.
fn is_stored(field: &str) -> bool {
    matches!(
        field,
        field_names::HU_ROOTS | field_names::NO_ROOTS | field_names::HU_ROOTS_LC | field_names::NO_ROOTS_LC
    )
}

/// Builds the schema shared by the indexer and the searcher.
pub fn build_schema() -> Schema {
    let mut schema_builder = Schema::builder();
    schema_builder.add_text_field(field_names::LANG, STRING | STORED);
    schema_builder.add_text_field(field_names::ID, STRING | STORED);
    // fast so search hits can be ordered without loading documents
    schema_builder.add_text_field(field_names::SORT, STRING | STORED | FAST);
    schema_builder.add_text_field(field_names::TEXT, TEXT | STORED);
    schema_builder.add_text_field(field_names::SUGGESTION, text_options(FOLDING, true));
    for field in FieldSet::all_names() {
        let tokenizer = analyzer_for(field).unwrap_or(FOLDING);
        schema_builder.add_text_field(field, text_options(tokenizer, is_stored(field)));
    }
    schema_builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tantivy::tokenizer::TokenStream;

    fn tokens(index: &Index, analyzer: &str, text: &str) -> Vec<String> {
        let mut analyzer = index.tokenizers().get(analyzer).unwrap();
        let mut stream = analyzer.token_stream(text);
        let mut result = Vec::new();
        while stream.advance() {
            result.push(stream.token().text.clone());
        }
        result
    }

    #[test]
    fn test_folding_strips_accents() {
        let index = Index::create_in_ram(build_schema());
        register_analyzers(&index);
        assert_eq!(tokens(&index, FOLDING, "Ház Smørbrød"), vec!["haz", "smorbrod"]);
        assert_eq!(tokens(&index, LOWERCASE, "Ház"), vec!["ház"]);
    }

    #[test]
    fn test_translation_fields_use_opposite_stemmer() {
        assert_eq!(analyzer_for(field_names::NO_TRANS), Some(HU_STEM));
        assert_eq!(analyzer_for(field_names::HU_TRANS), Some(NO_STEM));
        assert_eq!(analyzer_for(field_names::ID), None);
    }

    #[test]
    fn test_schema_has_every_field() {
        let schema = build_schema();
        for name in FieldSet::all_names() {
            assert!(schema.get_field(name).is_ok(), "missing {}", name);
        }
        assert!(schema.get_field(field_names::SUGGESTION).is_ok());
    }
}
