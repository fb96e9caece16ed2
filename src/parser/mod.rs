// Entry parser for the dictionary export
//
// This module turns a stream of markup events into normalized entry records:
// the element vocabulary, the event source abstraction with its quick-xml
// adapter, the separator table, and the entry parsing state machine.

pub mod tag_names;
pub mod markup_event;
pub mod xml_source;
pub mod separator;
pub mod parser_state;
pub mod entry_parser;

pub use tag_names::TagKind;
pub use markup_event::{MarkupEvent, EventSource, EventQueue};
pub use xml_source::XmlEventSource;
pub use separator::SeparatorTable;
pub use parser_state::ParseState;
pub use entry_parser::EntryParser;
