//! Flattening CMS documents into string-valued records.
//!
//! # Design
//! The CMS wraps every payload in a top-level `data` field: an object for a
//! single item, an array of objects for a collection. Field values arrive with
//! arbitrary JSON types and are flattened to strings with `stringify_leaf`.
//! Collection endpoints may return several versions of the same item; the
//! highest `_version` per `_item_zuid` is kept.

use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Value};

use crate::error::FetchError;

/// A single content item with every field flattened to a string.
pub type Record = BTreeMap<String, String>;

/// Collection items, at most one per `_item_zuid`.
pub type RecordSet = Vec<Record>;

pub const ITEM_ZUID_FIELD: &str = "_item_zuid";
pub const VERSION_FIELD: &str = "_version";

/// String form of a JSON value. Nested containers become compact JSON text
/// and `null` becomes the empty string.
pub fn stringify_leaf(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

pub fn record_from_object(object: &Map<String, Value>) -> Record {
    object
        .iter()
        .map(|(key, value)| (key.clone(), stringify_leaf(value)))
        .collect()
}

/// Extract the `data` object of a single-item document.
pub fn item_from_document(document: &Value) -> Result<Record, FetchError> {
    match document.get("data") {
        Some(Value::Object(object)) => Ok(record_from_object(object)),
        Some(other) => Err(FetchError::Shape(format!(
            "`data` is {}, expected an object",
            kind_of(other)
        ))),
        None => Err(FetchError::Shape("missing `data` field".to_string())),
    }
}

/// Extract and deduplicate the `data` array of a collection document.
pub fn collection_from_document(document: &Value) -> Result<RecordSet, FetchError> {
    let items = match document.get("data") {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(FetchError::Shape(format!(
                "`data` is {}, expected an array",
                kind_of(other)
            )))
        }
        None => return Err(FetchError::Shape("missing `data` field".to_string())),
    };

    let records = items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(object) => Ok(record_from_object(object)),
            other => Err(FetchError::Shape(format!(
                "`data[{index}]` is {}, expected an object",
                kind_of(other)
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    dedup_latest(records)
}

/// Keep one record per `_item_zuid`: the one with the greatest `_version`.
///
/// A later record replaces the current winner only when its version is
/// strictly greater, so among equal versions the first one seen survives.
/// Output order follows the first appearance of each `_item_zuid`.
pub fn dedup_latest<I>(records: I) -> Result<RecordSet, FetchError>
where
    I: IntoIterator<Item = Record>,
{
    let mut winners: RecordSet = Vec::new();
    let mut slots: HashMap<String, (usize, i64)> = HashMap::new();

    for record in records {
        // A JSON null has already been flattened to "" here.
        let zuid = record
            .get(ITEM_ZUID_FIELD)
            .filter(|zuid| !zuid.is_empty())
            .cloned()
            .ok_or_else(|| FetchError::Shape(format!("record lacks `{ITEM_ZUID_FIELD}`")))?;
        let version = parse_version(&record, &zuid)?;

        match slots.get_mut(&zuid) {
            Some((slot, best)) => {
                if version > *best {
                    *best = version;
                    winners[*slot] = record;
                }
            }
            None => {
                slots.insert(zuid, (winners.len(), version));
                winners.push(record);
            }
        }
    }

    Ok(winners)
}

fn parse_version(record: &Record, zuid: &str) -> Result<i64, FetchError> {
    let raw = record
        .get(VERSION_FIELD)
        .ok_or_else(|| FetchError::Shape(format!("record {zuid} lacks `{VERSION_FIELD}`")))?;
    raw.parse().map_err(|_| {
        FetchError::Shape(format!(
            "record {zuid} has non-integer `{VERSION_FIELD}`: {raw:?}"
        ))
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
