//! JSON document codec.
//!
//! Current format is a versioned envelope:
//! `{"version":1,"activeListId":<id|null>,"lists":[...]}`.
//! The bare list array written by the earlier web build is still accepted;
//! its selection is derived by reconciliation.

use crate::model::document::{Document, InvariantViolation};
use crate::model::todo::{ListId, TodoList};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key under which the serialized document is stored.
pub const STORAGE_KEY: &str = "todoAppLists";

/// Envelope version written by `serialize`.
pub const FORMAT_VERSION: u64 = 1;

/// Stored payload could not be turned into a valid document.
#[derive(Debug)]
pub enum ParseError {
    /// Not JSON, or JSON with the wrong field shapes.
    Malformed(serde_json::Error),
    /// Top-level value is neither an envelope object nor a list array.
    UnexpectedShape,
    UnsupportedVersion(u64),
    /// Well-formed but breaks a document invariant.
    Invalid(InvariantViolation),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "malformed document payload: {err}"),
            Self::UnexpectedShape => {
                write!(f, "document payload must be an object or a list array")
            }
            Self::UnsupportedVersion(version) => write!(
                f,
                "document format version {version} is not supported (expected {FORMAT_VERSION})"
            ),
            Self::Invalid(violation) => write!(f, "invalid document: {violation}"),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(err) => Some(err),
            Self::Invalid(violation) => Some(violation),
            Self::UnexpectedShape | Self::UnsupportedVersion(_) => None,
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(value: serde_json::Error) -> Self {
        Self::Malformed(value)
    }
}

impl From<InvariantViolation> for ParseError {
    fn from(value: InvariantViolation) -> Self {
        Self::Invalid(value)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeRef<'a> {
    version: u64,
    active_list_id: Option<ListId>,
    lists: &'a [TodoList],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    #[allow(dead_code)]
    version: u64,
    #[serde(default)]
    active_list_id: Option<ListId>,
    lists: Vec<TodoList>,
}

/// Encodes the full document, selection included.
///
/// Output is deterministic: field order follows struct order and list/todo
/// order follows the document.
pub fn serialize(document: &Document) -> String {
    let envelope = EnvelopeRef {
        version: FORMAT_VERSION,
        active_list_id: document.active_list_id(),
        lists: document.lists(),
    };
    // Only strings, integers and bools with string keys; serde_json cannot fail here.
    serde_json::to_string(&envelope).expect("document envelope always encodes as JSON")
}

/// Decodes a stored payload.
///
/// # Errors
/// - `ParseError::Malformed` for invalid JSON or field shapes.
/// - `ParseError::UnexpectedShape` for scalars at the top level.
/// - `ParseError::UnsupportedVersion` for envelopes from another format.
/// - `ParseError::Invalid` for duplicate ids or blank names/texts.
pub fn deserialize(payload: &str) -> Result<Document, ParseError> {
    let value: Value = serde_json::from_str(payload)?;
    if let Some(version) = value.get("version").and_then(Value::as_u64) {
        if version != FORMAT_VERSION {
            return Err(ParseError::UnsupportedVersion(version));
        }
    }

    match value {
        Value::Array(_) => {
            let lists: Vec<TodoList> = serde_json::from_value(value)?;
            Ok(Document::from_parts(lists, None)?)
        }
        Value::Object(_) => {
            let envelope: Envelope = serde_json::from_value(value)?;
            Ok(Document::from_parts(
                envelope.lists,
                envelope.active_list_id,
            )?)
        }
        _ => Err(ParseError::UnexpectedShape),
    }
}
