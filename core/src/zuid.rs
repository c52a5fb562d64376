//! Content identifier (ZUID) conventions.
//!
//! A ZUID's leading digit hints at what it names: `7` for a single item,
//! `6` for a collection. The hint is advisory; `fetch_item` and `fetch_array`
//! accept any identifier.

use serde_json::Value;

use crate::record::{Record, RecordSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZuidKind {
    Item,
    Collection,
    Other,
}

impl ZuidKind {
    pub fn of(zuid: &str) -> Self {
        match zuid.as_bytes().first() {
            Some(b'7') => ZuidKind::Item,
            Some(b'6') => ZuidKind::Collection,
            _ => ZuidKind::Other,
        }
    }
}

/// Result of `ContentClient::fetch_content`, shaped by the ZUID's kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Item(Record),
    Collection(RecordSet),
    /// The untouched JSON document for identifiers without a known prefix.
    Document(Value),
}
