// Utility functions and helpers
//
// This module provides small general-purpose helpers: Roman numeral
// formatting for sense group labels and progress reporting for indexing runs.

pub mod roman_numerals;
pub mod progress_report;

pub use roman_numerals::to_roman;
pub use progress_report::{ProgressState, ProgressReportFn};
