//! Error types and result type for the dict-index crate.
//!
//! This module defines all error variants that can occur while tokenizing a
//! dictionary export, parsing entries, and writing or searching the full-text
//! index. It uses the `snafu` library for ergonomic error handling with
//! automatic backtrace capture.
//!
//! # Examples
//!
//! ```
//! use dict_index::{Result, DictError};
//!
//! fn open_export(path: &str) -> Result<String> {
//!     if path.is_empty() {
//!         return Err(DictError::invalid_argument("Export path cannot be empty"));
//!     }
//!     Ok(path.to_string())
//! }
//!
//! assert!(open_export("").is_err());
//! ```
//!
//! # Error Variants
//!
//! - [`DictError::Io`]: I/O errors from file operations
//! - [`DictError::ParserError`]: XML/JSON syntax errors surfaced by the tokenizer
//! - [`DictError::InvalidDataFormat`]: Markup the tokenizer accepted but we cannot decode
//! - [`DictError::InvalidArgument`]: Contract violations such as a non-positive numeral
//! - [`DictError::IndexError`]: Failures reported by the tantivy index
//! - [`DictError::Config`]: Invalid indexer configuration values
//! - [`DictError::UserInterrupted`]: The progress callback cancelled a run

use std::io;
use snafu::{Snafu, Backtrace};

// Re-export snafu for context providers
pub use snafu;

/// Main error type for the dict-index crate.
///
/// All errors include automatic backtrace capture for debugging purposes.
/// Use the helper methods on `DictError` for convenient error construction.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum DictError {
    /// I/O error occurred during file operations.
    #[snafu(display("IO error: {source}"))]
    Io {
        source: io::Error,
        backtrace: Backtrace,
    },

    /// Error parsing XML, JSON, or other structured data formats.
    #[snafu(display("Parser error: {source}"))]
    ParserError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
        backtrace: Backtrace,
    },

    /// Markup is well-formed but its content cannot be decoded.
    #[snafu(display("Invalid data format: {message}"))]
    InvalidDataFormat {
        message: String,
        backtrace: Backtrace,
    },

    /// Function was called with an argument outside its domain.
    #[snafu(display("Invalid argument: {message}"))]
    InvalidArgument {
        message: String,
        backtrace: Backtrace,
    },

    /// The full-text index reported an error.
    #[snafu(display("Index error: {source}"))]
    IndexError {
        source: tantivy::TantivyError,
        backtrace: Backtrace,
    },

    /// Indexer configuration is missing a value or holds an invalid one.
    #[snafu(display("Configuration error: {message}"))]
    Config {
        message: String,
        backtrace: Backtrace,
    },

    /// Operation was interrupted by the progress callback.
    #[snafu(display("User interrupted"))]
    UserInterrupted {
        backtrace: Backtrace,
    },
}

impl From<io::Error> for DictError {
    fn from(source: io::Error) -> Self {
        Self::Io { source, backtrace: Backtrace::capture() }
    }
}

impl From<quick_xml::Error> for DictError {
    fn from(source: quick_xml::Error) -> Self {
        Self::ParserError { source: Box::new(source), backtrace: Backtrace::capture() }
    }
}

impl From<serde_json::Error> for DictError {
    fn from(source: serde_json::Error) -> Self {
        Self::ParserError { source: Box::new(source), backtrace: Backtrace::capture() }
    }
}

impl From<tantivy::TantivyError> for DictError {
    fn from(source: tantivy::TantivyError) -> Self {
        Self::IndexError { source, backtrace: Backtrace::capture() }
    }
}

impl From<std::string::FromUtf8Error> for DictError {
    fn from(source: std::string::FromUtf8Error) -> Self {
        Self::InvalidDataFormat { message: format!("Invalid UTF-8 (String): {}", source), backtrace: Backtrace::capture() }
    }
}

impl From<std::str::Utf8Error> for DictError {
    fn from(source: std::str::Utf8Error) -> Self {
        Self::InvalidDataFormat { message: format!("Invalid UTF-8 (&str): {}", source), backtrace: Backtrace::capture() }
    }
}

/// Helper methods for creating errors without context providers.
impl DictError {
    /// Creates an `InvalidArgument` error with the given message.
    ///
    /// # Examples
    ///
    /// ```
    /// use dict_index::DictError;
    ///
    /// let error = DictError::invalid_argument("Roman numerals start at 1");
    /// assert!(error.is_invalid_argument());
    /// ```
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates an `InvalidDataFormat` error with the given message.
    pub fn invalid_data_format<S: Into<String>>(message: S) -> Self {
        Self::InvalidDataFormat {
            message: message.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Wraps any syntax-level error reported by a tokenizer.
    pub fn parser_error<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ParserError {
            source: Box::new(source),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates a `Config` error with the given message.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates a `UserInterrupted` error.
    pub fn user_interrupted() -> Self {
        Self::UserInterrupted {
            backtrace: Backtrace::capture(),
        }
    }

    /// Checks if this error is an `InvalidArgument` variant.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, DictError::InvalidArgument { .. })
    }

    /// Checks if this error came from the markup tokenizer.
    pub fn is_parser_error(&self) -> bool {
        matches!(self, DictError::ParserError { .. } | DictError::InvalidDataFormat { .. })
    }
}

/// A specialized `Result` type for dict-index operations.
///
/// This is a convenience type alias that uses [`DictError`] as the error type.
pub type Result<T> = std::result::Result<T, DictError>;
