//! Entry parsing state machine.
//!
//! This module turns the nested markup of one dictionary entry into an
//! [`EntryRecord`]. It handles:
//! - Headword, part-of-speech and inflection formatting (the form block)
//! - Sense group and sense numbering (the sense block)
//! - Translation, label and usage example glue
//! - Collecting the searchable word sets
//!
//! # Numbering
//!
//! A lone child is never numbered. The first sense group (or sense) only gets
//! its label once a second one starts; the label is then inserted in front of
//! the text already built for the first child. Groups use Roman numerals,
//! senses Arabic ones, and sense numbering restarts in every group.
//!
//! # Examples
//!
//! ```
//! use dict_index::parser::{EntryParser, XmlEventSource};
//!
//! # fn main() -> dict_index::Result<()> {
//! let xml = r#"<dict><entry id="1"><formGrp><form primary="yes"><orth>hus</orth><pos>n</pos></form></formGrp>
//! <senseGrp><sense><trans>ház</trans><trans>épület</trans></sense></senseGrp></entry></dict>"#;
//! let mut parser = EntryParser::new(XmlEventSource::from_xml_str(xml));
//! let entry = parser.next_entry()?.unwrap();
//! assert_eq!(entry.id.as_deref(), Some("1"));
//! assert_eq!(entry.display_text, "<b>hus</b> n ház, épület");
//! assert!(parser.next_entry()?.is_none());
//! # Ok(())
//! # }
//! ```

use log::{debug, trace};

use crate::model::EntryRecord;
use crate::parser::{EventSource, MarkupEvent, ParseState, SeparatorTable, TagKind};
use crate::utils::to_roman;
use crate::Result;

const ATTR_ID: &str = "id";
const ATTR_PRIMARY: &str = "primary";
const ATTR_TYPE: &str = "type";
const PRIMARY_YES: &str = "yes";
const INFL_TYPE_SUFFIX: &str = "suff";

/// Pulls entries out of an [`EventSource`], one at a time.
///
/// The parser borrows nothing from the caller beyond the source it was given;
/// call [`into_inner`](Self::into_inner) to get the source back.
pub struct EntryParser<S: EventSource> {
    source: S,
    entries_parsed: u64,
    failed: bool,
}

impl<S: EventSource> EntryParser<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            entries_parsed: 0,
            failed: false,
        }
    }

    /// Whether the underlying source may still hold events.
    ///
    /// A `true` answer does not promise another entry: trailing markup after
    /// the last entry makes [`next_entry`](Self::next_entry) return `None`.
    pub fn has_next(&self) -> bool {
        !self.failed && self.source.has_next()
    }

    /// Number of entries returned so far.
    pub fn entries_parsed(&self) -> u64 {
        self.entries_parsed
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    /// Parses up to the next `entry` close and returns the finished record.
    ///
    /// Returns `Ok(None)` when the events run out first, including when they
    /// stop in the middle of an entry; that partial entry is dropped.
    ///
    /// # Errors
    ///
    /// Tokenizer errors are passed through unchanged. After an error the
    /// parser is exhausted: [`has_next`](Self::has_next) turns `false` and
    /// later calls return `Ok(None)`.
    pub fn next_entry(&mut self) -> Result<Option<EntryRecord>> {
        if self.failed {
            return Ok(None);
        }
        let result = self.read_entry();
        if result.is_err() {
            self.failed = true;
        }
        result
    }

    fn read_entry(&mut self) -> Result<Option<EntryRecord>> {
        let mut state = ParseState::new();
        let mut entry_open = false;
        while let Some(event) = self.source.next_event()? {
            match event {
                MarkupEvent::Open { ref tag, .. } => {
                    let kind = TagKind::from_name(tag);
                    if kind == TagKind::Entry {
                        state = ParseState::new();
                        entry_open = true;
                    }
                    process_open(&mut state, &kind, &event)?;
                }
                MarkupEvent::Text(text) => {
                    if state.collect_text {
                        state.text.push_str(&text);
                    }
                }
                MarkupEvent::Close { tag } => {
                    process_close(&mut state, TagKind::from_name(&tag));
                }
            }
            if state.entry_complete {
                self.entries_parsed += 1;
                trace!(
                    "Parsed entry {:?} ({} roots, {} translations)",
                    state.entry.id,
                    state.entry.roots.len(),
                    state.entry.translations.len()
                );
                return Ok(Some(state.entry));
            }
        }
        if entry_open {
            debug!("Event stream ended inside entry {:?}; entry dropped", state.entry.id);
        }
        Ok(None)
    }
}

impl<S: EventSource> Iterator for EntryParser<S> {
    type Item = Result<EntryRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry().transpose()
    }
}

fn process_open(state: &mut ParseState, kind: &TagKind, event: &MarkupEvent) -> Result<()> {
    match kind {
        TagKind::Entry => {
            state.entry.id = event.attribute(ATTR_ID).map(str::to_string);
            state.form_buffer.clear();
            state.sense_grp_buffer.clear();
        }
        TagKind::FormGrp => {
            state.form_buffer.clear();
        }
        TagKind::Form => {
            state.regular_inflection = false;
            state.infl_par_buffer.clear();
            state.primary_form = event.attribute(ATTR_PRIMARY) == Some(PRIMARY_YES);
        }
        TagKind::InflCode => {
            if event.attribute(ATTR_TYPE) == Some(INFL_TYPE_SUFFIX) {
                state.collect_text = true;
                state.regular_inflection = true;
            }
        }
        TagKind::InflPar => {
            if !state.infl_par_buffer.is_empty() {
                state.infl_par_buffer.push_str("; ");
                state.infl_seq_buffer.clear();
            }
        }
        TagKind::SenseGrp => {
            state.sense_buffer.clear();
            let count = state.sense_grp_count;
            if count > 0 {
                if count == 1 {
                    state.sense_grp_buffer.insert_str(0, "<b>I</b> ");
                }
                let numeral = to_roman(count as i64 + 1)?;
                state.sense_grp_buffer.push_str(&format!(" <b>{}</b> ", numeral));
            }
        }
        TagKind::Sense => {
            let count = state.sense_count;
            if count > 0 {
                if count == 1 {
                    state.sense_buffer.insert_str(0, "<b>1</b> ");
                }
                state.sense_buffer.push_str(&format!(" <b>{}</b> ", count + 1));
            }
        }
        TagKind::Eg => {
            state.example_buffer.clear();
            state.in_example = true;
        }
        _ => {}
    }
    if kind.collects_text() {
        state.collect_text = true;
    }
    Ok(())
}

fn process_close(state: &mut ParseState, kind: TagKind) {
    let text = std::mem::take(&mut state.text);
    match kind {
        TagKind::Entry => {
            state.entry.display_text = state.display_text();
            state.entry_complete = true;
        }
        TagKind::Form => {
            if !state.regular_inflection && !state.infl_par_buffer.is_empty() {
                state.form_buffer.push_str(&format!(" ({})", state.infl_par_buffer));
            }
        }
        TagKind::Orth => {
            state.entry.add_root(&text);
            ParseState::append_separated(&mut state.form_buffer, " ", &format!("<b>{}</b>", text));
            state.collect_text = false;
        }
        TagKind::Pos => {
            if state.primary_form {
                state.form_buffer.push(' ');
                state.form_buffer.push_str(&text);
            }
            state.collect_text = false;
        }
        TagKind::InflCode => {
            if !text.is_empty() {
                state.form_buffer.push(' ');
                state.form_buffer.push_str(&text);
            }
            state.collect_text = false;
        }
        TagKind::InflPar => {
            if !state.infl_par_buffer.is_empty() {
                state.infl_par_buffer.push_str("; ");
            }
            // the sequence buffer is kept; only a following paradigm resets it
            state.infl_par_buffer.push_str(&state.infl_seq_buffer);
            state.collect_text = false;
        }
        TagKind::InflSeq => {
            state.entry.forms.insert(text.clone());
            ParseState::append_separated(&mut state.infl_seq_buffer, ", ", &text);
            state.collect_text = false;
        }
        TagKind::SenseGrp => {
            state.sense_grp_buffer.push_str(&state.sense_buffer);
            state.sense_grp_count += 1;
            state.sense_count = 0;
        }
        TagKind::Sense => {
            state.sense_count += 1;
        }
        TagKind::Trans => {
            if state.in_example {
                state.entry.quotation_translations.insert(text.clone());
                match state.previous {
                    Some(TagKind::Trans) => state.example_buffer.push_str(", "),
                    Some(TagKind::Lbl) | Some(TagKind::Q) => state.example_buffer.push(' '),
                    _ => {}
                }
                state.example_buffer.push_str(&text);
            } else {
                state.entry.translations.insert(text.clone());
                let glue = SeparatorTable::separator_for(state.previous.as_ref(), &TagKind::Trans);
                ParseState::append_separated(&mut state.sense_buffer, glue, &text);
            }
            state.collect_text = false;
        }
        TagKind::Lbl => {
            let glue = SeparatorTable::separator_for(state.previous.as_ref(), &TagKind::Lbl);
            ParseState::append_separated(&mut state.sense_buffer, glue, &format!("<i>{}</i>", text));
            state.collect_text = false;
        }
        TagKind::Eg => {
            state.in_example = false;
            // looked up before `previous` becomes `eg`: the glue depends on the
            // last element closed inside the example
            let glue = SeparatorTable::separator_for(state.previous.as_ref(), &TagKind::Eg);
            ParseState::append_separated(&mut state.sense_buffer, glue, &state.example_buffer);
        }
        TagKind::Q => {
            state.entry.quotations.insert(text.clone());
            ParseState::append_separated(&mut state.example_buffer, ", ", &format!("<b>{}</b>", text));
            state.collect_text = false;
        }
        TagKind::FormGrp | TagKind::Other(_) => {}
    }
    state.finish_element(kind);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::EventQueue;

    fn open(tag: &str) -> MarkupEvent {
        MarkupEvent::open(tag, &[])
    }

    fn close(tag: &str) -> MarkupEvent {
        MarkupEvent::close(tag)
    }

    /// `<tag>text</tag>`
    fn leaf(tag: &str, text: &str) -> Vec<MarkupEvent> {
        vec![open(tag), MarkupEvent::text(text), close(tag)]
    }

    fn entry(body: Vec<Vec<MarkupEvent>>) -> EventQueue {
        let mut events = vec![MarkupEvent::open("entry", &[("id", "1")])];
        events.extend(body.into_iter().flatten());
        events.push(close("entry"));
        events.into()
    }

    fn parse_one(queue: EventQueue) -> EntryRecord {
        EntryParser::new(queue).next_entry().unwrap().unwrap()
    }

    fn sense(body: Vec<Vec<MarkupEvent>>) -> Vec<MarkupEvent> {
        let mut events = vec![open("sense")];
        events.extend(body.into_iter().flatten());
        events.push(close("sense"));
        events
    }

    fn sense_grp(senses: Vec<Vec<MarkupEvent>>) -> Vec<MarkupEvent> {
        let mut events = vec![open("senseGrp")];
        events.extend(senses.into_iter().flatten());
        events.push(close("senseGrp"));
        events
    }

    fn eg(body: Vec<Vec<MarkupEvent>>) -> Vec<MarkupEvent> {
        let mut events = vec![open("eg")];
        events.extend(body.into_iter().flatten());
        events.push(close("eg"));
        events
    }

    #[test]
    fn test_repeated_root_is_stored_once() {
        let record = parse_one(entry(vec![
            vec![open("formGrp"), open("form")],
            leaf("orth", "hus"),
            leaf("orth", "hus"),
            vec![close("form"), close("formGrp")],
        ]));
        assert_eq!(record.roots.len(), 1);
        assert_eq!(record.sort_key.as_deref(), Some("hus"));
        assert_eq!(record.display_text, "<b>hus</b> <b>hus</b> ");
    }

    #[test]
    fn test_sort_key_is_first_orth() {
        let record = parse_one(entry(vec![
            vec![open("formGrp"), open("form")],
            leaf("orth", "aaaaaa"),
            leaf("orth", "aaaaab"),
            vec![close("form"), close("formGrp")],
        ]));
        assert_eq!(record.sort_key.as_deref(), Some("aaaaaa"));
    }

    #[test]
    fn test_no_orth_means_no_sort_key() {
        let record = parse_one(entry(vec![sense_grp(vec![sense(vec![leaf("trans", "t")])])]));
        assert!(record.sort_key.is_none());
        assert!(record.roots.is_empty());
    }

    #[test]
    fn test_single_sense_is_not_numbered() {
        let record = parse_one(entry(vec![sense_grp(vec![sense(vec![leaf("trans", "trans1")])])]));
        assert_eq!(record.display_text, " trans1");
        assert!(!record.display_text.contains("<b>I</b>"));
        assert!(!record.display_text.contains("<b>1</b>"));
    }

    #[test]
    fn test_second_sense_numbers_the_first() {
        let record = parse_one(entry(vec![sense_grp(vec![
            sense(vec![leaf("trans", "trans1")]),
            sense(vec![leaf("trans", "trans2")]),
        ])]));
        assert_eq!(record.display_text, " <b>1</b> trans1 <b>2</b> trans2");
    }

    #[test]
    fn test_sense_groups_use_roman_numerals() {
        let record = parse_one(entry(vec![
            sense_grp(vec![sense(vec![leaf("trans", "a")])]),
            sense_grp(vec![sense(vec![leaf("trans", "b")])]),
            sense_grp(vec![sense(vec![leaf("trans", "c")])]),
        ]));
        assert_eq!(record.display_text, " <b>I</b> a <b>II</b> b <b>III</b> c");
    }

    #[test]
    fn test_sense_numbering_restarts_per_group() {
        let record = parse_one(entry(vec![
            sense_grp(vec![
                sense(vec![leaf("trans", "trans1")]),
                sense(vec![leaf("trans", "trans2")]),
            ]),
            sense_grp(vec![
                sense(vec![leaf("trans", "trans3")]),
                sense(vec![leaf("trans", "trans4")]),
            ]),
        ]));
        assert_eq!(
            record.display_text,
            " <b>I</b> <b>1</b> trans1 <b>2</b> trans2 <b>II</b> <b>1</b> trans3 <b>2</b> trans4"
        );
    }

    #[test]
    fn test_translation_glue() {
        let record = parse_one(entry(vec![sense_grp(vec![sense(vec![
            leaf("trans", "trans1"),
            leaf("trans", "trans2"),
        ])])]));
        assert_eq!(record.display_text, " trans1, trans2");
        assert_eq!(record.translations.len(), 2);
    }

    #[test]
    fn test_label_glue() {
        let record = parse_one(entry(vec![sense_grp(vec![sense(vec![
            leaf("lbl", "lbl1"),
            leaf("lbl", "lbl2"),
        ])])]));
        assert_eq!(record.display_text, " <i>lbl1</i> <i>lbl2</i>");
        assert!(record.translations.is_empty());
    }

    #[test]
    fn test_translation_then_example() {
        let record = parse_one(entry(vec![sense_grp(vec![sense(vec![
            leaf("trans", "trans1"),
            eg(vec![leaf("q", "q1"), leaf("trans", "trans2")]),
        ])])]));
        assert_eq!(record.display_text, " trans1; <b>q1</b> trans2");
        assert!(record.quotations.contains("q1"));
        assert!(record.quotation_translations.contains("trans2"));
        assert!(!record.translations.contains("trans2"));
    }

    #[test]
    fn test_label_inside_example_goes_to_sense_block() {
        let record = parse_one(entry(vec![sense_grp(vec![sense(vec![eg(vec![
            leaf("q", "q1"),
            leaf("lbl", "lbl1"),
            leaf("trans", "trans1"),
        ])])])]));
        assert_eq!(record.display_text, " <i>lbl1</i>; <b>q1</b> trans1");
    }

    #[test]
    fn test_example_translations_joined_with_comma() {
        let record = parse_one(entry(vec![sense_grp(vec![sense(vec![eg(vec![
            leaf("q", "q1"),
            leaf("trans", "trans1"),
            leaf("trans", "trans2"),
        ])])])]));
        assert_eq!(record.display_text, " <b>q1</b> trans1, trans2");
    }

    #[test]
    fn test_form_block_with_inflections() {
        let form_primary = vec![
            vec![MarkupEvent::open("form", &[("primary", "yes")])],
            leaf("orth", "orth1"),
            leaf("pos", "pos1"),
            vec![MarkupEvent::open("inflCode", &[("type", "suff")]), MarkupEvent::text("suff1"), close("inflCode")],
            vec![open("inflPar")],
            leaf("inflSeq", "inflSeq1"),
            leaf("inflSeq", "inflSeq2"),
            vec![close("inflPar"), close("form")],
        ];
        let form_irregular = vec![
            vec![open("form")],
            leaf("orth", "orth2"),
            leaf("pos", "pos2"),
            vec![open("inflPar")],
            leaf("inflSeq", "inflSeq3"),
            leaf("inflSeq", "inflSeq4"),
            vec![close("inflPar"), open("inflPar")],
            leaf("inflSeq", "inflSeq5"),
            leaf("inflSeq", "inflSeq6"),
            vec![close("inflPar"), close("form")],
        ];
        let form_plain = vec![vec![open("form")], leaf("orth", "orth3"), vec![close("form")]];
        let mut body = vec![vec![open("formGrp")]];
        body.extend(form_primary);
        body.extend(form_irregular);
        body.extend(form_plain);
        body.push(vec![close("formGrp")]);

        let record = parse_one(entry(body));
        assert_eq!(
            record.display_text,
            "<b>orth1</b> pos1 suff1 <b>orth2</b> (inflSeq1, inflSeq2, inflSeq3, inflSeq4; ; inflSeq5, inflSeq6) <b>orth3</b> "
        );
        assert_eq!(record.roots.len(), 3);
        assert_eq!(record.forms.len(), 6);
        assert_eq!(record.sort_key.as_deref(), Some("orth1"));
    }

    #[test]
    fn test_non_suffix_infl_code_is_not_collected() {
        let record = parse_one(entry(vec![
            vec![open("formGrp"), MarkupEvent::open("form", &[("primary", "yes")])],
            leaf("orth", "hus"),
            vec![MarkupEvent::open("inflCode", &[("type", "other")]), MarkupEvent::text("x"), close("inflCode")],
            vec![close("form"), close("formGrp")],
        ]));
        assert_eq!(record.display_text, "<b>hus</b> ");
    }

    #[test]
    fn test_text_outside_text_elements_is_ignored() {
        let record = parse_one(entry(vec![
            vec![MarkupEvent::text("noise")],
            sense_grp(vec![vec![MarkupEvent::text("more")], sense(vec![leaf("trans", "t")])]),
        ]));
        assert_eq!(record.display_text, " t");
    }

    #[test]
    fn test_unknown_tags_are_ignored() {
        let record = parse_one(entry(vec![sense_grp(vec![sense(vec![
            leaf("trans", "a"),
            leaf("xr", "see also"),
            leaf("trans", "b"),
        ])])]));
        assert_eq!(record.display_text, " ab");
        assert_eq!(record.translations.len(), 2);
    }

    #[test]
    fn test_empty_entry_degrades_to_whitespace() {
        let record = parse_one(entry(vec![]));
        assert_eq!(record.id.as_deref(), Some("1"));
        assert_eq!(record.display_text, " ");
        assert!(record.is_empty());
    }

    #[test]
    fn test_missing_id_is_absent() {
        let queue: EventQueue = vec![open("entry"), close("entry")].into();
        let record = parse_one(queue);
        assert!(record.id.is_none());
    }

    #[test]
    fn test_truncated_entry_yields_nothing() {
        let queue: EventQueue = vec![
            MarkupEvent::open("entry", &[("id", "1")]),
            open("formGrp"),
            open("form"),
            open("orth"),
            MarkupEvent::text("cut"),
        ]
        .into();
        let mut parser = EntryParser::new(queue);
        assert!(parser.next_entry().unwrap().is_none());
        assert!(!parser.has_next());
        assert_eq!(parser.entries_parsed(), 0);
    }

    #[test]
    fn test_parser_is_exhausted_after_error() {
        struct Failing;
        impl EventSource for Failing {
            fn next_event(&mut self) -> Result<Option<MarkupEvent>> {
                Err(crate::DictError::invalid_data_format("broken"))
            }
            fn has_next(&self) -> bool {
                true
            }
        }
        let mut parser = EntryParser::new(Failing);
        assert!(parser.has_next());
        assert!(parser.next_entry().is_err());
        assert!(!parser.has_next());
        assert!(parser.next_entry().unwrap().is_none());
        assert!(parser.next().is_none());
    }

    #[test]
    fn test_into_inner_keeps_unread_events() {
        let events: Vec<MarkupEvent> = vec![
            MarkupEvent::open("entry", &[("id", "1")]),
            close("entry"),
            MarkupEvent::open("entry", &[("id", "2")]),
            close("entry"),
        ];
        let mut parser = EntryParser::new(EventQueue::from(events));
        assert_eq!(parser.next_entry().unwrap().unwrap().id.as_deref(), Some("1"));

        let mut source = parser.into_inner();
        assert!(source.has_next());
        assert_eq!(source.next_event().unwrap(), Some(MarkupEvent::open("entry", &[("id", "2")])));
    }

    #[test]
    fn test_iterator_yields_every_entry() {
        let events: Vec<MarkupEvent> = vec![
            open("dict"),
            MarkupEvent::open("entry", &[("id", "1")]),
            close("entry"),
            MarkupEvent::open("entry", &[("id", "2")]),
            close("entry"),
            close("dict"),
        ];
        let parser = EntryParser::new(EventQueue::from(events));
        let ids: Vec<String> = parser
            .map(|r| r.unwrap().id.unwrap())
            .collect();
        assert_eq!(ids, vec!["1".to_string(), "2".to_string()]);
    }
}
