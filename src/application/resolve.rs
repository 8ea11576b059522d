//! Deployment target resolution
//!
//! Turns a user-supplied domain name or id into a [`DeploymentTarget`] using
//! the domain records and the configured hosts.

use crate::config::{ConfigError, Settings};
use crate::domain::entities::DomainRecord;
use crate::domain::ports::{DomainRepository, DomainStoreError};
use crate::domain::value_objects::{DeploymentTarget, TargetError};

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("domain '{0}' not found")]
    NotFound(String),

    #[error("domain '{0}' has no hosted site")]
    NotHosted(String),

    #[error("Unsupported live server: {0}")]
    UnsupportedServer(String),

    #[error(transparent)]
    Store(#[from] DomainStoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Target(#[from] TargetError),
}

/// A deployment target plus the hosts it moves files between
#[derive(Debug, Clone)]
pub struct ResolvedDeployment {
    pub record: DomainRecord,
    pub target: DeploymentTarget,
    pub staging_host: String,
    pub live_host: String,
}

/// Resolve `name_or_id` to a deployable target.
pub fn resolve_target<R>(
    repository: &R,
    settings: &Settings,
    name_or_id: &str,
) -> Result<ResolvedDeployment, ResolveError>
where
    R: DomainRepository + ?Sized,
{
    let registry = repository.load()?;
    let record = registry
        .find(name_or_id)
        .cloned()
        .ok_or_else(|| ResolveError::NotFound(name_or_id.trim().to_string()))?;

    let server = record
        .server()
        .ok_or_else(|| ResolveError::NotHosted(record.name.clone()))?
        .to_string();
    if !settings.is_live_host(&server) {
        return Err(ResolveError::UnsupportedServer(server));
    }

    let staging = settings.staging()?;
    let live = settings
        .host(&server)
        .ok_or_else(|| ResolveError::UnsupportedServer(server.clone()))?;

    let target = DeploymentTarget::new(
        record.name.clone(),
        staging.root.clone(),
        live.root.clone(),
        settings.backup_root(live),
    )?;
    tracing::debug!(
        domain = %record.name,
        staging = %settings.staging_host,
        live = %server,
        "resolved deployment target"
    );

    Ok(ResolvedDeployment {
        record,
        target,
        staging_host: settings.staging_host.clone(),
        live_host: server,
    })
}
