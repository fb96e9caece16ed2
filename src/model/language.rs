//! Source language of a dictionary export.
//!
//! The exports come in two directions (Hungarian-Norwegian and
//! Norwegian-Hungarian). The language names the side the headwords are
//! written in; translations are in the other language.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{DictError, Result};

/// Headword language of an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Hungarian headwords, Norwegian translations
    Hu,
    /// Norwegian headwords, Hungarian translations
    No,
}

impl Language {
    /// Lowercase two-letter code, as stored in the index.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Hu => "hu",
            Language::No => "no",
        }
    }

    /// The language translations of this side are written in.
    pub fn opposite(&self) -> Language {
        match self {
            Language::Hu => Language::No,
            Language::No => Language::Hu,
        }
    }
}

impl FromStr for Language {
    type Err = DictError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "hu" => Ok(Language::Hu),
            "no" => Ok(Language::No),
            _ => Err(DictError::invalid_argument(format!("Unsupported language: {}", s))),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_language_codes() {
        assert_eq!("hu".parse::<Language>().unwrap(), Language::Hu);
        assert_eq!("NO".parse::<Language>().unwrap(), Language::No);
        assert!("de".parse::<Language>().unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Language::No).unwrap(), "\"no\"");
        let lang: Language = serde_json::from_str("\"hu\"").unwrap();
        assert_eq!(lang, Language::Hu);
        assert_eq!(Language::Hu.opposite(), Language::No);
    }
}
