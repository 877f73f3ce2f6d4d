//! target-intercom - Singer target for Intercom
//!
//! Reads the Singer message protocol (SCHEMA, RECORD, STATE) from a line
//! source, validates every record against its stream's schema, and pushes
//! records of the configured users stream to Intercom as one-item bulk jobs.
//! The last STATE value not followed by a record is returned so it can be
//! emitted for the upstream tap to resume from.
//!
//! # Modules
//!
//! - [`protocol`] - message types and the line reader
//! - [`registry`] - per-stream schemas and validators
//! - [`transform`] - flattening and reserved-field mapping
//! - [`submit`] - bulk job submission
//! - [`checkpoint`] - STATE tracking and emission
//! - [`pipeline`] - the driver tying it together
//! - [`telemetry`] - anonymous usage ping
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod checkpoint;
pub mod cli;
pub mod config;
mod error;
pub mod pipeline;
pub mod protocol;
pub mod registry;
pub mod submit;
pub mod telemetry;
pub mod transform;

pub use checkpoint::{CheckpointTracker, emit_state};
pub use config::{Config, ReservedFieldOverrides};
pub use error::TargetError;
pub use pipeline::{Pipeline, PipelineStats, TargetContext};
pub use protocol::{Message, MessageReader, parse_line};
pub use registry::{SchemaRegistry, StreamSchema};
pub use submit::BatchSubmitter;
pub use transform::{FLATTEN_SEPARATOR, RESERVED_FIELDS, RecordTransformer, TargetItem, flatten};
