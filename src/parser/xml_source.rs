//! quick-xml backed event source.
//!
//! Adapts the pull reader of `quick-xml` to the [`EventSource`] interface.
//! Element names are reported by local name (namespace prefixes dropped),
//! empty elements are expanded into an open/close pair, and entity or
//! character references are resolved into text events. Text is passed on
//! untrimmed, with `\r\n` and lone `\r` line breaks turned into `\n`.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;
use quick_xml::Reader;
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesStart, Event};

use crate::parser::{EventSource, MarkupEvent};
use crate::{DictError, Result};

/// Streams [`MarkupEvent`]s out of an XML document.
///
/// The source owns the underlying reader; dropping it releases the file.
///
/// # Examples
///
/// ```
/// use dict_index::parser::{EventSource, MarkupEvent, XmlEventSource};
///
/// # fn main() -> dict_index::Result<()> {
/// let mut source = XmlEventSource::from_xml_str(r#"<entry id="7"><orth>hal</orth></entry>"#);
/// assert_eq!(source.next_event()?, Some(MarkupEvent::open("entry", &[("id", "7")])));
/// assert_eq!(source.next_event()?, Some(MarkupEvent::open("orth", &[])));
/// assert_eq!(source.next_event()?, Some(MarkupEvent::text("hal")));
/// # Ok(())
/// # }
/// ```
pub struct XmlEventSource<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    pending: VecDeque<MarkupEvent>,
    finished: bool,
}

impl XmlEventSource<BufReader<File>> {
    /// Opens an XML file for streaming.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Opening XML export: {}", path.display());
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<'a> XmlEventSource<&'a [u8]> {
    /// Streams an in-memory XML document.
    pub fn from_xml_str(xml: &'a str) -> Self {
        Self::from_reader(xml.as_bytes())
    }
}

impl<R: BufRead> XmlEventSource<R> {
    pub fn from_reader(inner: R) -> Self {
        let mut reader = Reader::from_reader(inner);
        reader.config_mut().trim_text(false);
        Self {
            reader,
            buf: Vec::new(),
            pending: VecDeque::new(),
            finished: false,
        }
    }

    /// Number of bytes consumed from the underlying reader so far.
    pub fn position(&self) -> u64 {
        self.reader.buffer_position() as u64
    }

    /// Gives back the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }

    /// Reads raw XML events until at least one markup event is queued or the
    /// document ends.
    fn fill_pending(&mut self) -> Result<()> {
        while self.pending.is_empty() && !self.finished {
            self.buf.clear();
            match self.reader.read_event_into(&mut self.buf)? {
                Event::Start(e) => {
                    self.pending.push_back(open_event(&e)?);
                }
                Event::Empty(e) => {
                    let open = open_event(&e)?;
                    let tag = match &open {
                        MarkupEvent::Open { tag, .. } => tag.clone(),
                        _ => String::new(),
                    };
                    self.pending.push_back(open);
                    self.pending.push_back(MarkupEvent::Close { tag });
                }
                Event::End(e) => {
                    let tag = std::str::from_utf8(e.local_name().as_ref())?.to_string();
                    self.pending.push_back(MarkupEvent::Close { tag });
                }
                Event::Text(e) => {
                    let text = std::str::from_utf8(&e)?;
                    if !text.is_empty() {
                        self.pending.push_back(MarkupEvent::Text(normalize_line_breaks(text)));
                    }
                }
                Event::CData(e) => {
                    let text = std::str::from_utf8(&e)?;
                    if !text.is_empty() {
                        self.pending.push_back(MarkupEvent::Text(normalize_line_breaks(text)));
                    }
                }
                Event::GeneralRef(e) => {
                    let name = std::str::from_utf8(&e)?;
                    self.pending.push_back(MarkupEvent::Text(resolve_reference(name)?));
                }
                Event::Eof => {
                    self.finished = true;
                }
                _ => {}
            }
        }
        Ok(())
    }
}

impl<R: BufRead> EventSource for XmlEventSource<R> {
    fn next_event(&mut self) -> Result<Option<MarkupEvent>> {
        self.fill_pending()?;
        Ok(self.pending.pop_front())
    }

    fn has_next(&self) -> bool {
        !self.pending.is_empty() || !self.finished
    }
}

fn open_event(e: &BytesStart) -> Result<MarkupEvent> {
    let tag = std::str::from_utf8(e.local_name().as_ref())?.to_string();
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(DictError::parser_error)?;
        let key = std::str::from_utf8(attr.key.local_name().as_ref())?.to_string();
        let raw = std::str::from_utf8(&attr.value)?;
        let value = unescape(raw).map_err(DictError::parser_error)?.into_owned();
        attributes.push((key, value));
    }
    Ok(MarkupEvent::Open { tag, attributes })
}

/// Literal line breaks in character data read as `\n`. A `&#13;` reference
/// is not literal and keeps its `\r`.
fn normalize_line_breaks(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Resolves `&name;` or `&#N;`/`&#xN;` to its text.
fn resolve_reference(name: &str) -> Result<String> {
    if let Some(code) = name.strip_prefix('#') {
        let value = match code.strip_prefix('x').or_else(|| code.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => code.parse::<u32>(),
        }
        .map_err(|_| DictError::invalid_data_format(format!("Invalid character reference: &{};", name)))?;
        return char::from_u32(value)
            .map(|c| c.to_string())
            .ok_or_else(|| DictError::invalid_data_format(format!("Invalid character reference: &{};", name)));
    }
    resolve_predefined_entity(name)
        .map(|s| s.to_string())
        .ok_or_else(|| DictError::invalid_data_format(format!("Unknown entity: &{};", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(xml: &str) -> Vec<MarkupEvent> {
        let mut source = XmlEventSource::from_xml_str(xml);
        let mut events = Vec::new();
        while let Some(event) = source.next_event().unwrap() {
            events.push(event);
        }
        assert!(!source.has_next());
        events
    }

    fn joined_text(events: &[MarkupEvent]) -> String {
        events
            .iter()
            .filter_map(|e| match e {
                MarkupEvent::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_empty_element_expands_to_open_close() {
        let events = drain(r#"<sense><lbl type="x"/></sense>"#);
        assert_eq!(
            events,
            vec![
                MarkupEvent::open("sense", &[]),
                MarkupEvent::open("lbl", &[("type", "x")]),
                MarkupEvent::close("lbl"),
                MarkupEvent::close("sense"),
            ]
        );
    }

    #[test]
    fn test_declaration_and_comments_are_skipped() {
        let events = drain("<?xml version=\"1.0\"?><!-- c --><entry id=\"1\"/>");
        assert_eq!(
            events,
            vec![MarkupEvent::open("entry", &[("id", "1")]), MarkupEvent::close("entry")]
        );
    }

    #[test]
    fn test_references_are_resolved() {
        let events = drain("<trans>a &amp; b &#x41;&#66;</trans>");
        assert_eq!(joined_text(&events), "a & b AB");
    }

    #[test]
    fn test_attribute_values_are_unescaped() {
        let events = drain(r#"<entry id="a&amp;b"></entry>"#);
        assert_eq!(events[0].attribute("id"), Some("a&b"));
    }

    #[test]
    fn test_namespace_prefix_is_dropped() {
        let events = drain(r#"<d:entry xmlns:d="urn:x"><d:orth>x</d:orth></d:entry>"#);
        assert_eq!(events[1], MarkupEvent::open("orth", &[]));
        assert_eq!(events[3], MarkupEvent::close("orth"));
    }

    #[test]
    fn test_whitespace_is_preserved() {
        let events = drain("<q> to go </q>");
        assert_eq!(joined_text(&events), " to go ");
    }

    #[test]
    fn test_line_breaks_are_normalized() {
        let events = drain("<trans> a\r\nb\rc</trans><q><![CDATA[x\r\ny]]></q>");
        assert_eq!(joined_text(&events), " a\nb\ncx\ny");
        let events = drain("<trans>a&#13;b</trans>");
        assert_eq!(joined_text(&events), "a\rb");
    }

    #[test]
    fn test_into_inner_returns_unread_input() {
        let xml = r#"<entry id="1"></entry><entry id="2"></entry>"#;
        let mut source = XmlEventSource::from_xml_str(xml);
        assert_eq!(source.next_event().unwrap(), Some(MarkupEvent::open("entry", &[("id", "1")])));
        let position = source.position();
        let rest = source.into_inner();
        assert_eq!(position as usize + rest.len(), xml.len());
        assert!(rest.ends_with(br#"<entry id="2"></entry>"#));
    }

    #[test]
    fn test_mismatched_end_tag_is_an_error() {
        let mut source = XmlEventSource::from_xml_str("<entry><orth>x</trans></entry>");
        let mut result = Ok(None);
        for _ in 0..10 {
            result = source.next_event();
            if result.is_err() {
                break;
            }
        }
        assert!(result.unwrap_err().is_parser_error());
    }
}
