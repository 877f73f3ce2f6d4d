//! Singer message protocol
//!
//! One JSON object per line. The `type` field selects the variant:
//!
//! ```text
//! {"type": "SCHEMA", "stream": "users", "schema": {...}, "key_properties": ["id"]}
//! {"type": "RECORD", "stream": "users", "record": {...}}
//! {"type": "STATE", "value": {...}}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::{BufRead, Lines};
use tracing::error;

use crate::TargetError;

/// Tags accepted in the `type` field
pub const MESSAGE_TYPES: [&str; 3] = ["SCHEMA", "RECORD", "STATE"];

/// A decoded protocol message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    /// Declares (or replaces) the schema for a stream
    Schema {
        stream: String,
        schema: Value,
        /// Presence is checked at registration, not while decoding
        #[serde(default)]
        key_properties: Option<Vec<String>>,
    },

    /// One data record for a stream
    Record { stream: String, record: Map<String, Value> },

    /// Opaque checkpoint the upstream tap can resume from
    #[serde(rename = "STATE")]
    Checkpoint { value: Value },
}

impl Message {
    /// Wire tag of this message
    pub fn type_name(&self) -> &'static str {
        match self {
            Message::Schema { .. } => "SCHEMA",
            Message::Record { .. } => "RECORD",
            Message::Checkpoint { .. } => "STATE",
        }
    }
}

/// Decode a single input line
///
/// `line_number` is 1-based and only used for diagnostics.
pub fn parse_line(line: &str, line_number: usize) -> Result<Message, TargetError> {
    let value: Value = serde_json::from_str(line).map_err(|source| {
        error!(line_number, %line, "Unable to parse line");
        TargetError::Parse { line_number, source }
    })?;

    let tag = match value.get("type") {
        Some(tag) => tag,
        None => {
            error!(line_number, %line, "Line is missing required key 'type'");
            return Err(TargetError::protocol(format!(
                "Line {line_number} is missing required key 'type': {line}"
            )));
        }
    };

    if !tag.as_str().is_some_and(|t| MESSAGE_TYPES.contains(&t)) {
        error!(line_number, %tag, "Unknown message type");
        return Err(TargetError::protocol(format!(
            "Unknown message type {tag} in message {value}"
        )));
    }

    serde_json::from_value(value).map_err(|e| {
        error!(line_number, %line, error = %e, "Malformed message");
        TargetError::protocol(format!("Line {line_number}: {e}"))
    })
}

/// Lazily decodes messages from a line-oriented source
///
/// The iterator yields one item per input line and is not restartable. It keeps
/// yielding after an error, but callers are expected to stop at the first one.
pub struct MessageReader<R> {
    lines: Lines<R>,
    line_number: usize,
}

impl<R: BufRead> MessageReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
        }
    }

    /// Number of lines consumed so far
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<R: BufRead> Iterator for MessageReader<R> {
    type Item = Result<Message, TargetError>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        self.line_number += 1;
        Some(line.map_err(TargetError::from).and_then(|l| parse_line(&l, self.line_number)))
    }
}
