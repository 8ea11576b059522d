//! Snapshot Manager
//!
//! Backs the live site up before a deployment mutates it, and restores it
//! when the deployment fails. Both directions run entirely on the destination
//! host through one session.
//!
//! Per-file failures are recorded as [`FileOutcome`]s and the pass moves on;
//! only a failure to enumerate the tree aborts a pass.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::ports::{DeployEvent, DeployEventSink, FileAccessSession, FsResult};
use crate::domain::services::relative_to;
use crate::domain::value_objects::DeployPhase;

use super::result::{failures, FileOutcome};

/// Lifecycle of the snapshot within one attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotState {
    #[default]
    NotStarted,
    Completed,
}

/// A backup of the destination directory
#[derive(Debug, Clone)]
pub struct Snapshot {
    state: SnapshotState,
    backup_dir: PathBuf,
    /// Destination-relative paths present when the backup ran
    manifest: BTreeSet<PathBuf>,
    outcomes: Vec<FileOutcome>,
}

impl Snapshot {
    pub fn not_started(backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            state: SnapshotState::NotStarted,
            backup_dir: backup_dir.into(),
            manifest: BTreeSet::new(),
            outcomes: Vec::new(),
        }
    }

    pub fn state(&self) -> SnapshotState {
        self.state
    }

    pub fn is_completed(&self) -> bool {
        self.state == SnapshotState::Completed
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    pub fn manifest(&self) -> &BTreeSet<PathBuf> {
        &self.manifest
    }

    pub fn outcomes(&self) -> &[FileOutcome] {
        &self.outcomes
    }

    pub fn failed_count(&self) -> usize {
        failures(&self.outcomes).count()
    }
}

pub struct SnapshotManager {
    events: Arc<dyn DeployEventSink>,
}

impl SnapshotManager {
    pub fn new(events: Arc<dyn DeployEventSink>) -> Self {
        Self { events }
    }

    /// Copy every file under `destination` into `backup_dir`.
    ///
    /// An empty destination yields a completed, empty snapshot.
    pub fn backup(
        &self,
        session: &dyn FileAccessSession,
        destination: &Path,
        backup_dir: &Path,
    ) -> FsResult<Snapshot> {
        let files = session.list_files(destination, true)?;
        let mut snapshot = Snapshot::not_started(backup_dir);

        if files.is_empty() {
            tracing::info!(
                destination = %destination.display(),
                "no files in destination, nothing to back up"
            );
            snapshot.state = SnapshotState::Completed;
            return Ok(snapshot);
        }

        for file in files {
            let outcome = match relative_to(destination, &file) {
                Ok(relative) => {
                    snapshot.manifest.insert(relative.clone());
                    let target = backup_dir.join(&relative);
                    match mirror(session, &file, &target) {
                        Ok(()) => FileOutcome::ok(&file),
                        Err(e) => FileOutcome::failed(&file, e),
                    }
                }
                Err(e) => FileOutcome::failed(&file, e),
            };
            self.report(DeployPhase::BackingUp, &outcome);
            snapshot.outcomes.push(outcome);
        }

        tracing::info!(
            files = snapshot.outcomes.len(),
            failed = snapshot.failed_count(),
            backup = %backup_dir.display(),
            "backup completed"
        );
        snapshot.state = SnapshotState::Completed;
        Ok(snapshot)
    }

    /// Copy every file in `backup_dir` back over `destination`.
    ///
    /// A missing backup directory restores nothing.
    pub fn restore(
        &self,
        session: &dyn FileAccessSession,
        backup_dir: &Path,
        destination: &Path,
    ) -> FsResult<Vec<FileOutcome>> {
        if !session.exists(backup_dir) {
            tracing::info!(
                backup = %backup_dir.display(),
                "no backup directory, nothing to restore"
            );
            return Ok(Vec::new());
        }

        let files = session.list_files(backup_dir, true)?;
        let mut outcomes = Vec::with_capacity(files.len());
        for file in files {
            let outcome = match relative_to(backup_dir, &file) {
                Ok(relative) => match mirror(session, &file, &destination.join(&relative)) {
                    Ok(()) => FileOutcome::ok(destination.join(&relative)),
                    Err(e) => FileOutcome::failed(destination.join(&relative), e),
                },
                Err(e) => FileOutcome::failed(&file, e),
            };
            self.report(DeployPhase::RollingBack, &outcome);
            outcomes.push(outcome);
        }

        tracing::info!(
            files = outcomes.len(),
            failed = failures(&outcomes).count(),
            "restore from backup completed"
        );
        Ok(outcomes)
    }

    /// Remove destination files that did not exist when `manifest` was taken.
    pub fn prune_additions(
        &self,
        session: &dyn FileAccessSession,
        destination: &Path,
        manifest: &BTreeSet<PathBuf>,
    ) -> Vec<FileOutcome> {
        let files = match session.list_files(destination, true) {
            Ok(files) => files,
            Err(e) => {
                let outcome = FileOutcome::failed(destination, e);
                self.report(DeployPhase::RollingBack, &outcome);
                return vec![outcome];
            }
        };

        let mut outcomes = Vec::new();
        for file in files {
            let Ok(relative) = relative_to(destination, &file) else {
                continue;
            };
            if manifest.contains(&relative) {
                continue;
            }
            let outcome = match session.remove_file(&file) {
                Ok(()) => FileOutcome::ok(&file),
                Err(e) => FileOutcome::failed(&file, e),
            };
            self.report(DeployPhase::RollingBack, &outcome);
            outcomes.push(outcome);
        }
        outcomes
    }

    fn report(&self, phase: DeployPhase, outcome: &FileOutcome) {
        if let Some(error) = &outcome.error {
            tracing::warn!(phase = %phase, path = %outcome.path.display(), %error, "file skipped");
            self.events.on_event(DeployEvent::FileFailed {
                phase,
                path: outcome.path.clone(),
                error: error.clone(),
            });
        }
    }
}

/// Copy `file` to `target` on the same host, creating the parent first.
fn mirror(session: &dyn FileAccessSession, file: &Path, target: &Path) -> FsResult<()> {
    if let Some(parent) = target.parent() {
        if !session.exists(parent) {
            session.create_dir(parent)?;
        }
    }
    session.copy_file(file, target, true)
}
