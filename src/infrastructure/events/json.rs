//! JSON Event Sink
//!
//! Outputs deploy events as NDJSON for CI/automation consumption.

use crate::domain::ports::{DeployEvent, DeployEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// JSON form of one event
pub fn event_json(event: &DeployEvent) -> serde_json::Value {
    match event {
        DeployEvent::Started {
            domain,
            source_host,
            destination_host,
        } => serde_json::json!({
            "event": "start",
            "command": "deploy",
            "domain": domain,
            "source_host": source_host,
            "destination_host": destination_host,
        }),

        DeployEvent::PhaseEntered { phase } => serde_json::json!({
            "event": "phase",
            "command": "deploy",
            "phase": phase.as_str(),
        }),

        DeployEvent::SnapshotTaken {
            backup_dir,
            file_count,
            failed_count,
        } => serde_json::json!({
            "event": "snapshot",
            "command": "deploy",
            "backup_dir": backup_dir.display().to_string(),
            "files": file_count,
            "failed": failed_count,
        }),

        DeployEvent::Planned {
            file_count,
            excluded_count,
        } => serde_json::json!({
            "event": "planned",
            "command": "deploy",
            "files": file_count,
            "excluded": excluded_count,
        }),

        DeployEvent::FileCopied { index, path, bytes } => serde_json::json!({
            "event": "item_written",
            "command": "deploy",
            "index": index,
            "path": path.display().to_string(),
            "bytes": bytes,
        }),

        DeployEvent::FileFailed { phase, path, error } => serde_json::json!({
            "event": "item_error",
            "command": "deploy",
            "phase": phase.as_str(),
            "path": path.display().to_string(),
            "error": error,
        }),

        DeployEvent::RollbackStarted => serde_json::json!({
            "event": "rollback_start",
            "command": "deploy",
        }),

        DeployEvent::RollbackFinished {
            restored,
            removed,
            failed,
        } => serde_json::json!({
            "event": "rollback_complete",
            "command": "deploy",
            "restored": restored,
            "removed": removed,
            "failed": failed,
        }),

        DeployEvent::Completed { success, message } => serde_json::json!({
            "event": "complete",
            "command": "deploy",
            "status": if *success { "success" } else { "failed" },
            "message": message,
        }),
    }
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        self.write_event(event_json(&event));
    }

    fn wants_detailed_events(&self) -> bool {
        true // JSON mode wants all events
    }
}
