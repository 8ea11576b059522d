//! DomainRepository port
//!
//! Persists the domain registry (by default at `~/.site-deploy/domains.toml`).

use std::path::PathBuf;

use crate::domain::entities::DomainRegistry;

pub trait DomainRepository: Send + Sync {
    /// Load the registry; a missing store yields an empty registry
    fn load(&self) -> Result<DomainRegistry, DomainStoreError>;

    /// Replace the stored registry
    fn save(&self, registry: &DomainRegistry) -> Result<(), DomainStoreError>;

    /// Load, apply `change`, and save under one exclusive lock
    fn update<T, F>(&self, change: F) -> Result<T, DomainStoreError>
    where
        F: FnOnce(&mut DomainRegistry) -> T,
        Self: Sized,
    {
        let mut registry = self.load()?;
        let out = change(&mut registry);
        self.save(&registry)?;
        Ok(out)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DomainStoreError {
    #[error("failed to access domain registry: {message}")]
    AccessError { message: String },

    #[error("failed to serialize domain registry: {message}")]
    SerializationError { message: String },

    #[error(
        "domain registry corrupted: {path}\n  → Fix: repair or delete the file\n  → Details: {message}"
    )]
    Corrupted { path: PathBuf, message: String },
}
