//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `DeploymentOrchestrator` - Promotes a staged site with snapshot and rollback
//! - `resolve_target` - Turns a domain name or id into a deployment target
//! - `host_domain` - Assigns a live server and creates the staging directory

pub mod deploy;
pub mod hosting;
pub mod resolve;

pub use deploy::{
    DeployOptions, DeploymentOrchestrator, DeploymentResult, FileOutcome, Rollback,
    RollbackReport, SnapshotManager,
};
pub use hosting::{choose_server, host_domain, HostingError, HostingOutcome, DEFAULT_PROVIDER};
pub use resolve::{resolve_target, ResolveError, ResolvedDeployment};
