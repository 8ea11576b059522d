//! Deployment target value object - where a site is promoted from and to.

use std::path::{Path, PathBuf};

/// Errors raised when building a [`DeploymentTarget`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    #[error("domain name cannot be empty")]
    EmptyDomain,

    #[error("domain name '{0}' must not contain path separators or be '.'/'..'")]
    InvalidDomain(String),

    #[error("deployment roots must be distinct, '{}' is used twice", .0.display())]
    DuplicateRoot(PathBuf),
}

/// Immutable descriptor of one site deployment.
///
/// The roots are host-level directories; the domain-specific working
/// directories are derived by the path planner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentTarget {
    domain: String,
    source_root: PathBuf,
    destination_root: PathBuf,
    backup_root: PathBuf,
}

impl DeploymentTarget {
    pub fn new(
        domain: impl Into<String>,
        source_root: impl Into<PathBuf>,
        destination_root: impl Into<PathBuf>,
        backup_root: impl Into<PathBuf>,
    ) -> Result<Self, TargetError> {
        let domain = domain.into();
        validate_domain_name(&domain)?;

        let source_root = source_root.into();
        let destination_root = destination_root.into();
        let backup_root = backup_root.into();

        if source_root == destination_root || source_root == backup_root {
            return Err(TargetError::DuplicateRoot(source_root));
        }
        if destination_root == backup_root {
            return Err(TargetError::DuplicateRoot(destination_root));
        }

        Ok(Self {
            domain,
            source_root,
            destination_root,
            backup_root,
        })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    pub fn destination_root(&self) -> &Path {
        &self.destination_root
    }

    pub fn backup_root(&self) -> &Path {
        &self.backup_root
    }
}

/// Check that a domain name can be used as a single path component.
pub fn validate_domain_name(domain: &str) -> Result<(), TargetError> {
    if domain.is_empty() {
        return Err(TargetError::EmptyDomain);
    }
    if domain.contains(['/', '\\']) || domain == "." || domain == ".." {
        return Err(TargetError::InvalidDomain(domain.to_string()));
    }
    Ok(())
}
