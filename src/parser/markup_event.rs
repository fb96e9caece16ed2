//! Markup events consumed by the entry parser.
//!
//! The parser never reads bytes itself. It pulls [`MarkupEvent`]s from an
//! [`EventSource`], which owns whatever file or buffer backs it.

use std::collections::VecDeque;

use crate::Result;

/// One event in document order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarkupEvent {
    /// An element starts
    Open {
        tag: String,
        attributes: Vec<(String, String)>,
    },
    /// Character data
    Text(String),
    /// An element ends
    Close { tag: String },
}

impl MarkupEvent {
    /// Shorthand for an `Open` event.
    pub fn open(tag: &str, attributes: &[(&str, &str)]) -> Self {
        MarkupEvent::Open {
            tag: tag.to_string(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Shorthand for a `Text` event.
    pub fn text(text: &str) -> Self {
        MarkupEvent::Text(text.to_string())
    }

    /// Shorthand for a `Close` event.
    pub fn close(tag: &str) -> Self {
        MarkupEvent::Close { tag: tag.to_string() }
    }

    /// Value of the named attribute on an `Open` event.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            MarkupEvent::Open { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }
}

/// Pull interface over a tokenized document.
pub trait EventSource {
    /// Returns the next event, or `None` once the document is exhausted.
    ///
    /// # Errors
    ///
    /// Syntax errors from the underlying tokenizer are returned unchanged.
    fn next_event(&mut self) -> Result<Option<MarkupEvent>>;

    /// Whether more events may follow.
    fn has_next(&self) -> bool;
}

/// In-memory event source over a prepared list of events.
///
/// # Examples
///
/// ```
/// use dict_index::parser::{EventQueue, EventSource, MarkupEvent};
///
/// let mut queue = EventQueue::from(vec![
///     MarkupEvent::open("entry", &[("id", "1")]),
///     MarkupEvent::close("entry"),
/// ]);
/// assert!(queue.has_next());
/// assert_eq!(queue.next_event().unwrap(), Some(MarkupEvent::open("entry", &[("id", "1")])));
/// ```
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    events: VecDeque<MarkupEvent>,
}

impl From<Vec<MarkupEvent>> for EventQueue {
    fn from(events: Vec<MarkupEvent>) -> Self {
        Self { events: events.into() }
    }
}

impl FromIterator<MarkupEvent> for EventQueue {
    fn from_iter<I: IntoIterator<Item = MarkupEvent>>(iter: I) -> Self {
        Self { events: iter.into_iter().collect() }
    }
}

impl EventSource for EventQueue {
    fn next_event(&mut self) -> Result<Option<MarkupEvent>> {
        Ok(self.events.pop_front())
    }

    fn has_next(&self) -> bool {
        !self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_lookup() {
        let event = MarkupEvent::open("form", &[("primary", "yes"), ("type", "x")]);
        assert_eq!(event.attribute("primary"), Some("yes"));
        assert_eq!(event.attribute("missing"), None);
        assert_eq!(MarkupEvent::close("form").attribute("primary"), None);
    }

    #[test]
    fn test_queue_drains_in_order() {
        let mut queue: EventQueue = vec![MarkupEvent::text("a"), MarkupEvent::text("b")].into();
        assert_eq!(queue.next_event().unwrap(), Some(MarkupEvent::text("a")));
        assert_eq!(queue.next_event().unwrap(), Some(MarkupEvent::text("b")));
        assert!(!queue.has_next());
        assert_eq!(queue.next_event().unwrap(), None);
    }
}
