//! Deploy Event Port
//!
//! Provides an observable interface for deployment attempts.
//! Enables console progress, JSON event streams, and test recording.

use std::path::PathBuf;

use crate::domain::value_objects::DeployPhase;

/// Event emitted during a deployment attempt
#[derive(Debug, Clone, PartialEq)]
pub enum DeployEvent {
    /// Attempt started
    Started {
        domain: String,
        source_host: String,
        destination_host: String,
    },

    /// The state machine moved into a new phase
    PhaseEntered { phase: DeployPhase },

    /// Live site snapshot finished
    SnapshotTaken {
        backup_dir: PathBuf,
        file_count: usize,
        failed_count: usize,
    },

    /// Copy plan built
    Planned {
        file_count: usize,
        excluded_count: usize,
    },

    /// One file streamed to the destination
    FileCopied {
        index: usize,
        path: PathBuf,
        bytes: u64,
    },

    /// A per-file operation failed and was skipped
    FileFailed {
        phase: DeployPhase,
        path: PathBuf,
        error: String,
    },

    /// Restore from snapshot started
    RollbackStarted,

    /// Restore from snapshot finished
    RollbackFinished {
        restored: usize,
        removed: usize,
        failed: usize,
    },

    /// Attempt reached a terminal state
    Completed { success: bool, message: String },
}

/// Trait for receiving deploy events
///
/// Implementations:
/// - ConsoleEventSink: progress lines in the terminal
/// - JsonEventSink: NDJSON stream for automation
/// - NoopEventSink: silent operation
pub trait DeployEventSink: Send + Sync {
    /// Handle a deploy event
    fn on_event(&self, event: DeployEvent);

    /// Whether this sink wants per-file events
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
