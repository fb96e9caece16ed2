//! Index field names.
//!
//! Entries of both export directions share one index. Language-specific
//! content goes to fields prefixed with the headword language, so a query can
//! target one side of the dictionary.

use crate::model::Language;

pub const LANG: &str = "lang";
pub const ID: &str = "id";
pub const SORT: &str = "sort";
pub const TEXT: &str = "text";
pub const SUGGESTION: &str = "suggestion";

pub const HU_ROOTS: &str = "hu_roots";
pub const NO_ROOTS: &str = "no_roots";
pub const HU_ROOTS_LC: &str = "hu_roots_lc";
pub const NO_ROOTS_LC: &str = "no_roots_lc";
pub const HU_FORMS: &str = "hu_forms";
pub const NO_FORMS: &str = "no_forms";
pub const HU_TRANS: &str = "hu_trans";
pub const NO_TRANS: &str = "no_trans";
pub const HU_QUOTE: &str = "hu_quote";
pub const NO_QUOTE: &str = "no_quote";
pub const HU_QUOTETRANS: &str = "hu_quoteTrans";
pub const NO_QUOTETRANS: &str = "no_quoteTrans";

/// Names of the fields an entry of one headword language is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSet {
    pub roots: &'static str,
    pub roots_lc: &'static str,
    pub forms: &'static str,
    pub trans: &'static str,
    pub quote: &'static str,
    pub quote_trans: &'static str,
}

const HU_FIELDS: FieldSet = FieldSet {
    roots: HU_ROOTS,
    roots_lc: HU_ROOTS_LC,
    forms: HU_FORMS,
    trans: HU_TRANS,
    quote: HU_QUOTE,
    quote_trans: HU_QUOTETRANS,
};

const NO_FIELDS: FieldSet = FieldSet {
    roots: NO_ROOTS,
    roots_lc: NO_ROOTS_LC,
    forms: NO_FORMS,
    trans: NO_TRANS,
    quote: NO_QUOTE,
    quote_trans: NO_QUOTETRANS,
};

impl FieldSet {
    pub fn for_language(language: Language) -> &'static FieldSet {
        match language {
            Language::Hu => &HU_FIELDS,
            Language::No => &NO_FIELDS,
        }
    }

    /// Every per-language field, for schema construction.
    pub fn all_names() -> [&'static str; 12] {
        [
            HU_ROOTS, NO_ROOTS, HU_ROOTS_LC, NO_ROOTS_LC, HU_FORMS, NO_FORMS,
            HU_TRANS, NO_TRANS, HU_QUOTE, NO_QUOTE, HU_QUOTETRANS, NO_QUOTETRANS,
        ]
    }

    /// Fields holding text written in `language`, outside the headwords.
    ///
    /// Hungarian text sits in the translations of Norwegian entries and in
    /// the quotations of Hungarian ones, and vice versa.
    pub fn full_text_in(language: Language) -> [&'static str; 3] {
        let own = Self::for_language(language);
        let other = Self::for_language(language.opposite());
        [other.trans, own.quote, other.quote_trans]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_sets_per_language() {
        assert_eq!(FieldSet::for_language(Language::Hu).roots, "hu_roots");
        assert_eq!(FieldSet::for_language(Language::No).quote_trans, "no_quoteTrans");
    }

    #[test]
    fn test_full_text_fields_follow_text_language() {
        assert_eq!(FieldSet::full_text_in(Language::Hu), ["no_trans", "hu_quote", "no_quoteTrans"]);
        assert_eq!(FieldSet::full_text_in(Language::No), ["hu_trans", "no_quote", "hu_quoteTrans"]);
    }
}
