//! Punctuation inserted between adjacent sense-level fragments.
//!
//! The glue between two fragments depends on the kind of the element that
//! closed last and the kind of the element being appended. Same-kind runs are
//! joined loosely, moving into or out of an example takes a semicolon, and
//! labels stay attached with a plain space.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::parser::TagKind;

static SEPARATORS: Lazy<HashMap<(TagKind, TagKind), &'static str>> = Lazy::new(|| {
    HashMap::from([
        ((TagKind::Trans, TagKind::Lbl), ", "),
        ((TagKind::Lbl, TagKind::Lbl), " "),
        ((TagKind::Eg, TagKind::Lbl), "; "),
        ((TagKind::Trans, TagKind::Eg), "; "),
        ((TagKind::Eg, TagKind::Eg), "; "),
        ((TagKind::Lbl, TagKind::Eg), " "),
        ((TagKind::Trans, TagKind::Trans), ", "),
        ((TagKind::Lbl, TagKind::Trans), " "),
        ((TagKind::Eg, TagKind::Trans), "; "),
    ])
});

/// Read-only lookup of separators keyed by (previous, current) element kind.
pub struct SeparatorTable;

impl SeparatorTable {
    /// Returns the separator to put between a fragment produced by `previous`
    /// and one produced by `current`, or `""` for unregistered pairs.
    pub fn separator_for(previous: Option<&TagKind>, current: &TagKind) -> &'static str {
        let Some(previous) = previous else {
            return "";
        };
        if matches!(previous, TagKind::Other(_)) || matches!(current, TagKind::Other(_)) {
            return "";
        }
        SEPARATORS
            .get(&(previous.clone(), current.clone()))
            .copied()
            .unwrap_or("")
    }
}
