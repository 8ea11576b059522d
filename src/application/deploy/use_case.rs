//! Deployment Orchestrator
//!
//! Drives one deployment attempt through its phases:
//! 1. Validate the staged site exists
//! 2. Prepare the live and backup directories
//! 3. Snapshot the live site
//! 4. Plan the file copy
//! 5. Stream every planned file to the live host
//!
//! A failure after the snapshot completed restores the live site from it.
//! Both sessions are owned for the duration of [`DeploymentOrchestrator::run`]
//! and closed on every exit path.

use std::io::{self, Read, Write};
use std::path::Path;
use std::sync::Arc;

use crate::domain::ports::{
    DeployEvent, DeployEventSink, FileAccessSession, FsError, FsResult, NoopEventSink,
    ScopedSession,
};
use crate::domain::services::{PathPlanner, WorkingDirectories};
use crate::domain::value_objects::{DeployPhase, DeploymentTarget};

use super::options::DeployOptions;
use super::result::{DeploymentResult, FileOutcome, Rollback, RollbackReport};
use super::snapshot::{Snapshot, SnapshotManager};

/// A fatal error that ended the attempt
#[derive(Debug)]
struct PhaseFailure {
    phase: DeployPhase,
    message: String,
}

impl PhaseFailure {
    fn new(phase: DeployPhase, message: impl Into<String>) -> Self {
        Self {
            phase,
            message: message.into(),
        }
    }
}

/// Mutable state of one attempt
struct Attempt {
    result: DeploymentResult,
    dirs: Option<WorkingDirectories>,
    snapshot: Option<Snapshot>,
}

pub struct DeploymentOrchestrator {
    planner: PathPlanner,
    options: DeployOptions,
    events: Arc<dyn DeployEventSink>,
}

impl DeploymentOrchestrator {
    pub fn new(options: DeployOptions) -> Self {
        Self {
            planner: PathPlanner::new(options.exclusions.clone()),
            options,
            events: Arc::new(NoopEventSink),
        }
    }

    /// Report progress to `events`
    pub fn with_events(mut self, events: Arc<dyn DeployEventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn options(&self) -> &DeployOptions {
        &self.options
    }

    /// Run one deployment attempt of `target` from `source` to `destination`.
    ///
    /// Never panics on I/O failure; the outcome is always a result.
    pub fn run<S, D>(
        &self,
        target: &DeploymentTarget,
        source: S,
        destination: D,
    ) -> DeploymentResult
    where
        S: FileAccessSession,
        D: FileAccessSession,
    {
        let source_guard = ScopedSession::new(source);
        let destination_guard = ScopedSession::new(destination);
        let source: &dyn FileAccessSession = &*source_guard;
        let destination: &dyn FileAccessSession = &*destination_guard;

        let _span = tracing::info_span!("deploy", domain = target.domain()).entered();
        self.events.on_event(DeployEvent::Started {
            domain: target.domain().to_string(),
            source_host: source.host().to_string(),
            destination_host: destination.host().to_string(),
        });

        let mut attempt = Attempt {
            result: DeploymentResult::new(target.domain()),
            dirs: None,
            snapshot: None,
        };
        self.enter(&mut attempt, DeployPhase::Init);

        match self.execute(target, source, destination, &mut attempt) {
            Ok(()) => {
                let failed = attempt.result.copy_failures().count();
                let mut message = format!(
                    "deployed {} file(s) to {}",
                    attempt.result.copied_count(),
                    destination.host()
                );
                if failed > 0 {
                    message.push_str(&format!(", {failed} file(s) failed"));
                }
                attempt.result.success = true;
                attempt.result.message = message;
                self.enter(&mut attempt, DeployPhase::Succeeded);
            }
            Err(failure) => {
                tracing::error!(
                    phase = %failure.phase,
                    error = %failure.message,
                    "deployment failed"
                );
                let message = self.fail(destination, &mut attempt, failure);
                attempt.result.message = message;
                self.enter(&mut attempt, DeployPhase::Failed);
            }
        }

        self.events.on_event(DeployEvent::Completed {
            success: attempt.result.success,
            message: attempt.result.message.clone(),
        });
        attempt.result
    }

    fn execute(
        &self,
        target: &DeploymentTarget,
        source: &dyn FileAccessSession,
        destination: &dyn FileAccessSession,
        attempt: &mut Attempt,
    ) -> Result<(), PhaseFailure> {
        // Validating
        self.enter(attempt, DeployPhase::Validating);
        let dirs = self
            .planner
            .directories(target)
            .map_err(|e| PhaseFailure::new(DeployPhase::Validating, e.to_string()))?;
        if !source.exists(&dirs.source) {
            return Err(PhaseFailure::new(
                DeployPhase::Validating,
                format!("source directory does not exist: {}", dirs.source.display()),
            ));
        }
        attempt.dirs = Some(dirs.clone());

        // Preparing
        self.enter(attempt, DeployPhase::Preparing);
        prepare(destination, &dirs).map_err(|e| {
            PhaseFailure::new(
                DeployPhase::Preparing,
                format!("failed to prepare directories: {e}"),
            )
        })?;
        attempt.result.backup_dir = Some(dirs.backup.clone());

        // BackingUp
        self.enter(attempt, DeployPhase::BackingUp);
        let snapshot = SnapshotManager::new(self.events.clone())
            .backup(destination, &dirs.destination, &dirs.backup)
            .map_err(|e| PhaseFailure::new(DeployPhase::BackingUp, format!("backup failed: {e}")))?;
        attempt.result.backup = snapshot.outcomes().to_vec();
        let backup_failures = snapshot.failed_count();
        if self.options.strict && backup_failures > 0 {
            return Err(PhaseFailure::new(
                DeployPhase::BackingUp,
                format!("backup failed for {backup_failures} file(s)"),
            ));
        }
        self.events.on_event(DeployEvent::SnapshotTaken {
            backup_dir: dirs.backup.clone(),
            file_count: snapshot.outcomes().len(),
            failed_count: backup_failures,
        });
        attempt.snapshot = Some(snapshot);

        // Planning
        self.enter(attempt, DeployPhase::Planning);
        let mapping = source
            .list_files(&dirs.source, true)
            .map_err(|e| e.to_string())
            .and_then(|files| self.planner.plan(&dirs, &files).map_err(|e| e.to_string()))
            .map_err(|e| {
                PhaseFailure::new(
                    DeployPhase::Planning,
                    format!("failed to generate file copy list: {e}"),
                )
            })?;
        attempt.result.excluded = mapping.excluded().to_vec();
        self.events.on_event(DeployEvent::Planned {
            file_count: mapping.len(),
            excluded_count: mapping.excluded().len(),
        });
        tracing::info!(
            files = mapping.len(),
            excluded = mapping.excluded().len(),
            "copy plan ready"
        );

        // Copying
        self.enter(attempt, DeployPhase::Copying);
        for dir in mapping.destination_dirs() {
            if destination.exists(dir) {
                continue;
            }
            destination.create_dir(dir).map_err(|e| {
                PhaseFailure::new(
                    DeployPhase::Copying,
                    format!("failed to create directory {}: {e}", dir.display()),
                )
            })?;
        }

        let mut buffer = vec![0u8; self.options.buffer_size.max(1)];
        for (index, (src, dst)) in mapping.iter().enumerate() {
            match stream_file(source, destination, src, dst, &mut buffer) {
                Ok(bytes) => {
                    attempt.result.bytes_copied += bytes;
                    attempt.result.copied.push(FileOutcome::ok(dst));
                    if self.events.wants_detailed_events() {
                        self.events.on_event(DeployEvent::FileCopied {
                            index,
                            path: dst.to_path_buf(),
                            bytes,
                        });
                    }
                }
                Err(e) => {
                    tracing::warn!(path = %dst.display(), error = %e, "file copy failed");
                    self.events.on_event(DeployEvent::FileFailed {
                        phase: DeployPhase::Copying,
                        path: dst.to_path_buf(),
                        error: e.to_string(),
                    });
                    attempt.result.copied.push(FileOutcome::failed(dst, &e));
                    if self.options.strict {
                        return Err(PhaseFailure::new(
                            DeployPhase::Copying,
                            format!("failed to copy {}: {e}", src.display()),
                        ));
                    }
                }
            }
        }

        Ok(())
    }

    /// Record the failure and roll back if a snapshot completed. Returns the
    /// final message.
    fn fail(
        &self,
        destination: &dyn FileAccessSession,
        attempt: &mut Attempt,
        failure: PhaseFailure,
    ) -> String {
        attempt.result.success = false;
        attempt.result.failed_phase = Some(failure.phase);
        let mut message = failure.message;

        let completed = attempt
            .snapshot
            .as_ref()
            .filter(|s| s.is_completed())
            .cloned();
        match (completed, attempt.dirs.clone()) {
            (Some(snapshot), Some(dirs)) => {
                self.enter(attempt, DeployPhase::RollingBack);
                let report = self.roll_back(destination, &snapshot, &dirs.destination);
                match &report.error {
                    None => message.push_str("; rolled back from snapshot"),
                    Some(e) => message.push_str(&format!("; rollback incomplete: {e}")),
                }
                attempt.result.rollback = Rollback::Performed(report);
            }
            _ if failure.phase >= DeployPhase::BackingUp => {
                message.push_str("; rollback not attempted");
                attempt.result.rollback = Rollback::Skipped;
            }
            _ => {}
        }

        message
    }

    fn roll_back(
        &self,
        destination: &dyn FileAccessSession,
        snapshot: &Snapshot,
        destination_dir: &Path,
    ) -> RollbackReport {
        self.events.on_event(DeployEvent::RollbackStarted);
        let snapshots = SnapshotManager::new(self.events.clone());
        let mut report = RollbackReport::default();

        match snapshots.restore(destination, snapshot.backup_dir(), destination_dir) {
            Ok(restored) => report.restored = restored,
            Err(e) => {
                tracing::error!(error = %e, "restore from snapshot failed");
                report.error = Some(e.to_string());
            }
        }
        report.removed =
            snapshots.prune_additions(destination, destination_dir, snapshot.manifest());

        self.events.on_event(DeployEvent::RollbackFinished {
            restored: report.restored.iter().filter(|o| o.is_ok()).count(),
            removed: report.removed.iter().filter(|o| o.is_ok()).count(),
            failed: report.failed_count(),
        });
        report
    }

    fn enter(&self, attempt: &mut Attempt, phase: DeployPhase) {
        tracing::debug!(phase = %phase, "entering phase");
        attempt.result.phases.push(phase);
        self.events.on_event(DeployEvent::PhaseEntered { phase });
    }
}

/// Ensure the live directory exists and the backup directory is fresh and empty.
fn prepare(destination: &dyn FileAccessSession, dirs: &WorkingDirectories) -> FsResult<()> {
    if !destination.exists(&dirs.destination) {
        tracing::info!(path = %dirs.destination.display(), "creating destination directory");
        destination.create_dir(&dirs.destination)?;
    }
    if destination.exists(&dirs.backup) {
        tracing::debug!(path = %dirs.backup.display(), "removing stale backup");
        destination.delete_dir(&dirs.backup)?;
    }
    destination.create_dir(&dirs.backup)
}

/// Stream `src` on the source host into `dst` on the destination host.
fn stream_file(
    source: &dyn FileAccessSession,
    destination: &dyn FileAccessSession,
    src: &Path,
    dst: &Path,
    buffer: &mut [u8],
) -> FsResult<u64> {
    let mut reader = source.open_read(src)?;
    let mut writer = destination.open_write(dst)?;
    let mut total = 0u64;

    loop {
        let read = match reader.read(buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(FsError::from_io(src, e)),
        };
        writer
            .write_all(&buffer[..read])
            .map_err(|e| FsError::from_io(dst, e))?;
        total += read as u64;
    }
    writer.flush().map_err(|e| FsError::from_io(dst, e))?;

    Ok(total)
}
