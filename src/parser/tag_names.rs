//! Element vocabulary of the dictionary export.
//!
//! Every open and close event is classified into a [`TagKind`] once, so the
//! entry parser can dispatch with a single `match` instead of comparing tag
//! names in every handler.

use std::fmt;

/// Kind of an element in the dictionary export.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// One dictionary entry
    Entry,
    /// Group of headword blocks
    FormGrp,
    /// One headword block
    Form,
    /// Orthographic headword
    Orth,
    /// Part of speech
    Pos,
    /// Inflection code, regular suffix when `type="suff"`
    InflCode,
    /// Inflection paradigm
    InflPar,
    /// Inflected form inside a paradigm
    InflSeq,
    /// Group of senses, numbered with Roman numerals
    SenseGrp,
    /// One sense, numbered with Arabic numerals
    Sense,
    /// Translation
    Trans,
    /// Usage label
    Lbl,
    /// Usage example
    Eg,
    /// Quotation inside a usage example
    Q,
    /// Any element the parser does not handle
    Other(String),
}

impl TagKind {
    pub const ENTRY: &'static str = "entry";
    pub const FORM_GRP: &'static str = "formGrp";
    pub const FORM: &'static str = "form";
    pub const ORTH: &'static str = "orth";
    pub const POS: &'static str = "pos";
    pub const INFL_CODE: &'static str = "inflCode";
    pub const INFL_PAR: &'static str = "inflPar";
    pub const INFL_SEQ: &'static str = "inflSeq";
    pub const SENSE_GRP: &'static str = "senseGrp";
    pub const SENSE: &'static str = "sense";
    pub const TRANS: &'static str = "trans";
    pub const LBL: &'static str = "lbl";
    pub const EG: &'static str = "eg";
    pub const QUOTE: &'static str = "q";

    /// Classifies an element by its local name. Matching is case-sensitive.
    pub fn from_name(name: &str) -> Self {
        match name {
            Self::ENTRY => TagKind::Entry,
            Self::FORM_GRP => TagKind::FormGrp,
            Self::FORM => TagKind::Form,
            Self::ORTH => TagKind::Orth,
            Self::POS => TagKind::Pos,
            Self::INFL_CODE => TagKind::InflCode,
            Self::INFL_PAR => TagKind::InflPar,
            Self::INFL_SEQ => TagKind::InflSeq,
            Self::SENSE_GRP => TagKind::SenseGrp,
            Self::SENSE => TagKind::Sense,
            Self::TRANS => TagKind::Trans,
            Self::LBL => TagKind::Lbl,
            Self::EG => TagKind::Eg,
            Self::QUOTE => TagKind::Q,
            other => TagKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TagKind::Entry => Self::ENTRY,
            TagKind::FormGrp => Self::FORM_GRP,
            TagKind::Form => Self::FORM,
            TagKind::Orth => Self::ORTH,
            TagKind::Pos => Self::POS,
            TagKind::InflCode => Self::INFL_CODE,
            TagKind::InflPar => Self::INFL_PAR,
            TagKind::InflSeq => Self::INFL_SEQ,
            TagKind::SenseGrp => Self::SENSE_GRP,
            TagKind::Sense => Self::SENSE,
            TagKind::Trans => Self::TRANS,
            TagKind::Lbl => Self::LBL,
            TagKind::Eg => Self::EG,
            TagKind::Q => Self::QUOTE,
            TagKind::Other(name) => name,
        }
    }

    /// Whether character data inside this element is collected.
    ///
    /// `inflCode` is not listed: it collects only when it is a regular suffix,
    /// which the parser decides from its attributes.
    pub fn collects_text(&self) -> bool {
        matches!(
            self,
            TagKind::Orth | TagKind::Pos | TagKind::InflSeq | TagKind::Trans | TagKind::Lbl | TagKind::Q
        )
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
