//! Pipeline driver
//!
//! Consumes protocol messages in order and dispatches each one:
//!
//! - SCHEMA registers the stream's schema
//! - RECORD is validated, then transformed and submitted if it belongs to the
//!   users stream; either way it clears the pending checkpoint
//! - STATE replaces the pending checkpoint
//!
//! The first error stops the run; nothing after it is read.

use intercom::BulkClient;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info};

use crate::checkpoint::CheckpointTracker;
use crate::config::Config;
use crate::protocol::Message;
use crate::registry::SchemaRegistry;
use crate::submit::BatchSubmitter;
use crate::transform::RecordTransformer;
use crate::TargetError;

/// Everything a run needs from the outside world, built once at startup
pub struct TargetContext {
    pub config: Config,
    pub client: Arc<dyn BulkClient>,
}

impl TargetContext {
    pub fn new(config: Config, client: Arc<dyn BulkClient>) -> Self {
        Self { config, client }
    }
}

/// Counters for a single run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub schemas: usize,
    pub records: usize,
    pub submitted: usize,
    pub skipped: usize,
    pub checkpoints: usize,
}

pub struct Pipeline {
    users_stream: Option<String>,
    registry: SchemaRegistry,
    transformer: RecordTransformer,
    submitter: BatchSubmitter,
    checkpoint: CheckpointTracker,
    stats: PipelineStats,
}

impl Pipeline {
    pub fn new(ctx: &TargetContext) -> Self {
        Self {
            users_stream: ctx.config.users_stream.clone(),
            registry: SchemaRegistry::new(),
            transformer: RecordTransformer::new(&ctx.config),
            submitter: BatchSubmitter::new(ctx.client.clone()),
            checkpoint: CheckpointTracker::new(),
            stats: PipelineStats::default(),
        }
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    pub fn checkpoint(&self) -> Option<&Value> {
        self.checkpoint.current()
    }

    /// Drive the pipeline until the messages run out or an error occurs
    ///
    /// Returns the checkpoint to emit, if any.
    pub async fn run<I>(mut self, messages: I) -> Result<Option<Value>, TargetError>
    where
        I: IntoIterator<Item = Result<Message, TargetError>>,
    {
        for message in messages {
            self.handle(message?).await?;
        }

        let stats = self.stats;
        info!(
            schemas = stats.schemas,
            records = stats.records,
            submitted = stats.submitted,
            skipped = stats.skipped,
            checkpoints = stats.checkpoints,
            "Input exhausted"
        );
        Ok(self.checkpoint.finish())
    }

    /// Process a single message
    pub async fn handle(&mut self, message: Message) -> Result<(), TargetError> {
        debug!(message_type = message.type_name(), "handle: called");
        match message {
            Message::Schema {
                stream,
                schema,
                key_properties,
            } => {
                self.registry.register(&stream, schema, key_properties)?;
                self.stats.schemas += 1;
            }
            Message::Record { stream, record } => {
                self.handle_record(&stream, record).await?;
                self.checkpoint.clear();
                self.stats.records += 1;
            }
            Message::Checkpoint { value } => {
                self.checkpoint.observe(value);
                self.stats.checkpoints += 1;
            }
        }
        Ok(())
    }

    async fn handle_record(&mut self, stream: &str, record: Map<String, Value>) -> Result<(), TargetError> {
        self.registry.validate(stream, &record)?;
        info!(%stream, "Stream");

        if self.users_stream.as_deref() != Some(stream) {
            info!(%stream, "Unsupported stream");
            self.stats.skipped += 1;
            return Ok(());
        }

        let item = self.transformer.transform(&record)?;
        self.submitter.submit(item).await?;
        self.stats.submitted += 1;
        Ok(())
    }
}
