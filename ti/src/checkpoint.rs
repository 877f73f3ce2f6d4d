//! Checkpoint tracking and emission

use serde_json::Value;
use std::io::Write;
use tracing::debug;

/// Last checkpoint seen since the most recent record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckpointTracker {
    value: Option<Value>,
}

impl CheckpointTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a checkpoint, replacing any earlier one
    pub fn observe(&mut self, value: Value) {
        debug!(%value, "Setting state");
        self.value = Some(value);
    }

    /// Forget the stored checkpoint once a record has been handled
    pub fn clear(&mut self) {
        self.value = None;
    }

    pub fn current(&self) -> Option<&Value> {
        self.value.as_ref().filter(|v| !v.is_null())
    }

    /// Final checkpoint for emission; JSON `null` counts as absent
    pub fn finish(self) -> Option<Value> {
        self.value.filter(|v| !v.is_null())
    }
}

/// Write the checkpoint as one JSON line, if there is one
pub fn emit_state<W: Write>(writer: &mut W, state: Option<&Value>) -> std::io::Result<()> {
    if let Some(state) = state {
        let line = serde_json::to_string(state)?;
        debug!(%line, "Emitting state");
        writeln!(writer, "{line}")?;
        writer.flush()?;
    }
    Ok(())
}
