//! Deploy Result
//!
//! Result types for deployment attempts.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::DeployPhase;

/// Outcome of one file in a best-effort loop (backup, copy, restore, prune)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub error: Option<String>,
}

impl FileOutcome {
    pub fn ok(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            error: None,
        }
    }

    pub fn failed(path: impl Into<PathBuf>, error: impl ToString) -> Self {
        Self {
            path: path.into(),
            error: Some(error.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Failed entries of a per-file outcome list
pub fn failures(outcomes: &[FileOutcome]) -> impl Iterator<Item = &FileOutcome> {
    outcomes.iter().filter(|o| !o.is_ok())
}

/// What the restore step did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollbackReport {
    /// Files copied back from the snapshot
    pub restored: Vec<FileOutcome>,
    /// Files the failed attempt added, removed again
    pub removed: Vec<FileOutcome>,
    /// Set when the restore pass itself could not run to completion
    pub error: Option<String>,
}

impl RollbackReport {
    pub fn failed_count(&self) -> usize {
        failures(&self.restored).count() + failures(&self.removed).count()
    }
}

/// Whether the destination was restored after a failure
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Rollback {
    /// The attempt succeeded or failed before anything was snapshotted
    #[default]
    NotNeeded,
    /// The attempt failed but no completed snapshot existed
    Skipped,
    /// Restore ran exactly once
    Performed(RollbackReport),
}

impl Rollback {
    pub fn was_attempted(&self) -> bool {
        matches!(self, Rollback::Performed(_))
    }

    pub fn report(&self) -> Option<&RollbackReport> {
        match self {
            Rollback::Performed(report) => Some(report),
            _ => None,
        }
    }
}

/// Result of one deployment attempt
#[derive(Debug, Clone)]
pub struct DeploymentResult {
    pub success: bool,
    /// First fatal cause on failure, a summary on success
    pub message: String,
    pub domain: String,
    /// Phase in which the fatal error occurred
    pub failed_phase: Option<DeployPhase>,
    /// Every phase entered, in order
    pub phases: Vec<DeployPhase>,
    pub backup: Vec<FileOutcome>,
    pub copied: Vec<FileOutcome>,
    /// Relative source paths skipped by exclusion rules
    pub excluded: Vec<PathBuf>,
    pub bytes_copied: u64,
    pub rollback: Rollback,
    /// Snapshot location on the destination host
    pub backup_dir: Option<PathBuf>,
}

impl DeploymentResult {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            success: false,
            message: String::new(),
            domain: domain.into(),
            failed_phase: None,
            phases: Vec::new(),
            backup: Vec::new(),
            copied: Vec::new(),
            excluded: Vec::new(),
            bytes_copied: 0,
            rollback: Rollback::NotNeeded,
            backup_dir: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn copied_count(&self) -> usize {
        self.copied.iter().filter(|o| o.is_ok()).count()
    }

    pub fn copy_failures(&self) -> impl Iterator<Item = &FileOutcome> {
        failures(&self.copied)
    }

    pub fn backup_failures(&self) -> impl Iterator<Item = &FileOutcome> {
        failures(&self.backup)
    }

    pub fn backup_dir(&self) -> Option<&Path> {
        self.backup_dir.as_deref()
    }

    /// Terminal phase of the attempt
    pub fn final_phase(&self) -> DeployPhase {
        if self.success {
            DeployPhase::Succeeded
        } else {
            DeployPhase::Failed
        }
    }
}
