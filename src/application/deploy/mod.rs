//! Deploy Module
//!
//! Promotes a staged site to its live host with snapshot and rollback.
//!
//! ## Structure
//!
//! - `options` - Configuration types (`DeployOptions`)
//! - `result` - Result types (`DeploymentResult`, `FileOutcome`, `Rollback`)
//! - `snapshot` - Backup and restore of the live site (`SnapshotManager`)
//! - `use_case` - The phase state machine (`DeploymentOrchestrator`)
//!
//! ## Usage
//!
//! ```ignore
//! use site_deploy::application::deploy::{DeployOptions, DeploymentOrchestrator};
//!
//! let orchestrator = DeploymentOrchestrator::new(DeployOptions::new());
//! let result = orchestrator.run(&target, staging_session, live_session);
//! ```

mod options;
mod result;
mod snapshot;
mod use_case;

pub use options::{DeployOptions, DEFAULT_BUFFER_SIZE};
pub use result::{failures, DeploymentResult, FileOutcome, Rollback, RollbackReport};
pub use snapshot::{Snapshot, SnapshotManager, SnapshotState};
pub use use_case::DeploymentOrchestrator;
