//! Schema registry
//!
//! Holds the most recent schema per stream together with its compiled draft-4
//! validator. Entries are replaced on every SCHEMA message and never removed.

use jsonschema::Validator;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info};

use crate::TargetError;

/// Registered schema for one stream
pub struct StreamSchema {
    schema: Value,
    validator: Validator,
    key_properties: Vec<String>,
}

impl StreamSchema {
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    pub fn key_properties(&self) -> &[String] {
        &self.key_properties
    }

    /// Every constraint `instance` violates, empty when valid
    pub fn violations(&self, instance: &Value) -> Vec<String> {
        self.validator.iter_errors(instance).map(|e| e.to_string()).collect()
    }
}

impl fmt::Debug for StreamSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamSchema")
            .field("schema", &self.schema)
            .field("key_properties", &self.key_properties)
            .finish_non_exhaustive()
    }
}

/// Stream name to schema mapping for a single run
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    streams: HashMap<String, StreamSchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile and store the schema for `stream`, replacing any earlier one
    pub fn register(
        &mut self,
        stream: &str,
        schema: Value,
        key_properties: Option<Vec<String>>,
    ) -> Result<(), TargetError> {
        debug!(%stream, "register: called");
        let key_properties = key_properties
            .ok_or_else(|| TargetError::protocol(format!("key_properties field is required (stream {stream})")))?;

        // `format` is an annotation here, never a constraint
        let validator = jsonschema::draft4::options()
            .should_validate_formats(false)
            .build(&schema)
            .map_err(|e| TargetError::protocol(format!("Invalid schema for stream {stream}: {e}")))?;

        let replaced = self
            .streams
            .insert(
                stream.to_string(),
                StreamSchema {
                    schema,
                    validator,
                    key_properties,
                },
            )
            .is_some();

        info!(%stream, replaced, "Registered schema");
        Ok(())
    }

    pub fn lookup(&self, stream: &str) -> Result<&StreamSchema, TargetError> {
        self.streams.get(stream).ok_or_else(|| TargetError::UnknownStream {
            stream: stream.to_string(),
        })
    }

    /// Validate a record against the schema registered for its stream
    pub fn validate(&self, stream: &str, record: &Map<String, Value>) -> Result<(), TargetError> {
        let entry = self.lookup(stream)?;
        let violations = entry.violations(&Value::Object(record.clone()));

        if violations.is_empty() {
            Ok(())
        } else {
            debug!(%stream, count = violations.len(), "validate: record rejected");
            Err(TargetError::Validation {
                stream: stream.to_string(),
                violations,
            })
        }
    }

    pub fn contains(&self, stream: &str) -> bool {
        self.streams.contains_key(stream)
    }

    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }
}
