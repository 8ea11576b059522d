//! Deploy phase value object - states of one deployment attempt.

use std::fmt;

/// State of a deployment attempt.
///
/// ```text
/// Init → Validating → Preparing → BackingUp → Planning → Copying → Succeeded
///                                      └──────────┴──────────┴→ RollingBack → Failed
/// ```
///
/// Failures before `BackingUp` completes go straight to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeployPhase {
    Init,
    Validating,
    Preparing,
    BackingUp,
    Planning,
    Copying,
    RollingBack,
    Succeeded,
    Failed,
}

impl DeployPhase {
    /// Stable identifier used in JSON events.
    pub fn as_str(self) -> &'static str {
        match self {
            DeployPhase::Init => "init",
            DeployPhase::Validating => "validating",
            DeployPhase::Preparing => "preparing",
            DeployPhase::BackingUp => "backing_up",
            DeployPhase::Planning => "planning",
            DeployPhase::Copying => "copying",
            DeployPhase::RollingBack => "rolling_back",
            DeployPhase::Succeeded => "succeeded",
            DeployPhase::Failed => "failed",
        }
    }

    /// Human label for console output.
    pub fn label(self) -> &'static str {
        match self {
            DeployPhase::Init => "Starting",
            DeployPhase::Validating => "Validating source",
            DeployPhase::Preparing => "Preparing destination",
            DeployPhase::BackingUp => "Backing up live site",
            DeployPhase::Planning => "Planning file copy",
            DeployPhase::Copying => "Copying files",
            DeployPhase::RollingBack => "Rolling back",
            DeployPhase::Succeeded => "Succeeded",
            DeployPhase::Failed => "Failed",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, DeployPhase::Succeeded | DeployPhase::Failed)
    }
}

impl fmt::Display for DeployPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
