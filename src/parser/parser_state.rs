//! Per-entry working memory of the entry parser.
//!
//! A fresh [`ParseState`] is created when an `entry` element opens and
//! dropped once the entry closes. The handlers in
//! [`EntryParser`](crate::parser::EntryParser) only ever touch the state that
//! belongs to the entry being parsed, so nothing leaks between entries.

use crate::model::EntryRecord;
use crate::parser::TagKind;

#[derive(Debug, Default)]
pub struct ParseState {
    /// Record being filled
    pub entry: EntryRecord,
    /// Set when the matching `entry` close has been processed
    pub entry_complete: bool,
    /// Kind of the element that closed last, `None` at entry start
    pub previous: Option<TagKind>,
    /// Whether character data is currently accumulated
    pub collect_text: bool,
    /// Character data of the element being read, cleared on every close
    pub text: String,

    /// Headwords, part of speech and inflections of the current form group
    pub form_buffer: String,
    /// Inflection paradigms of the current form
    pub infl_par_buffer: String,
    /// Inflected forms of the current paradigm
    pub infl_seq_buffer: String,
    /// The open form carries `primary="yes"`
    pub primary_form: bool,
    /// The open form is inflected with a regular suffix
    pub regular_inflection: bool,

    /// Formatted sense groups so far
    pub sense_grp_buffer: String,
    pub sense_grp_count: usize,
    /// Formatted senses of the open sense group
    pub sense_buffer: String,
    pub sense_count: usize,

    /// Inside a usage example
    pub in_example: bool,
    /// Formatted content of the open usage example
    pub example_buffer: String,
}

impl ParseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `separator` to `buffer` unless the buffer is still empty.
    pub fn append_separated(buffer: &mut String, separator: &str, text: &str) {
        if !buffer.is_empty() {
            buffer.push_str(separator);
        }
        buffer.push_str(text);
    }

    /// Assembles the display text from the form block and the sense block.
    pub fn display_text(&self) -> String {
        let mut text = String::with_capacity(self.form_buffer.len() + self.sense_grp_buffer.len() + 1);
        text.push_str(&self.form_buffer);
        text.push(' ');
        text.push_str(&self.sense_grp_buffer);
        text
    }

    /// Ends the element that just closed: remembers its kind for separator
    /// lookup and drops its collected text.
    pub fn finish_element(&mut self, kind: TagKind) {
        self.previous = Some(kind);
        self.text.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text_of_empty_state_is_a_space() {
        let state = ParseState::new();
        assert_eq!(state.display_text(), " ");
    }

    #[test]
    fn test_append_separated_skips_leading_separator() {
        let mut buffer = String::new();
        ParseState::append_separated(&mut buffer, ", ", "a");
        ParseState::append_separated(&mut buffer, ", ", "b");
        assert_eq!(buffer, "a, b");
    }

    #[test]
    fn test_finish_element_resets_text() {
        let mut state = ParseState::new();
        state.text.push_str("orth1");
        state.finish_element(TagKind::Orth);
        assert!(state.text.is_empty());
        assert_eq!(state.previous, Some(TagKind::Orth));
    }
}
