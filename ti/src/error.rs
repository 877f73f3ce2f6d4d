//! Target error types

use intercom::IntercomError;
use thiserror::Error;

/// Fatal errors that abort a run
#[derive(Debug, Error)]
pub enum TargetError {
    #[error("Unable to parse line {line_number}: {source}")]
    Parse {
        line_number: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("A record for stream {stream} was encountered before a corresponding schema")]
    UnknownStream { stream: String },

    #[error("Record for stream {stream} failed validation: {}", .violations.join("; "))]
    Validation { stream: String, violations: Vec<String> },

    #[error("Reserved field override {reserved} -> {source_key}: '{source_key}' not found in record")]
    Transform { reserved: String, source_key: String },

    #[error("Bulk job submission failed: {0}")]
    Submission(#[from] IntercomError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TargetError {
    pub fn protocol(message: impl Into<String>) -> Self {
        TargetError::Protocol(message.into())
    }
}
