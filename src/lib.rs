//! site-deploy - staged website promotion with snapshot and rollback
//!
//! Copies a domain's staged files from the staging host to its live host.
//! The live site is snapshotted first; any failure after the snapshot
//! restores it, so a failed deployment leaves the previous site in place.
//!
//! ## Layers
//!
//! - `domain` - Entities, value objects, planning rules and ports
//! - `application` - The deployment state machine and domain use cases
//! - `infrastructure` - Local and ssh sessions, the TOML domain store, event sinks
//! - `presentation` - CLI definition and dependency wiring
//! - `config` - Settings loading and validation

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenience
pub use application::{DeployOptions, DeploymentOrchestrator, DeploymentResult, Rollback};
pub use config::Settings;
pub use domain::ports::{DeployEvent, DeployEventSink, FileAccessSession, FsError};
pub use domain::value_objects::{DeployPhase, DeploymentTarget, ExclusionRules};
pub use error::{SiteDeployError, SiteDeployResult};
