//! Error types for site-deploy
//!
//! Each concern has its own `thiserror` enum; `SiteDeployError` wraps them
//! for callers that cross several layers.

use std::path::PathBuf;
use thiserror::Error;

use crate::application::hosting::HostingError;
use crate::application::resolve::ResolveError;
use crate::config::ConfigError;
use crate::domain::entities::DomainRecordError;
use crate::domain::ports::{DomainStoreError, FsError, SessionError};
use crate::domain::services::PathError;
use crate::domain::value_objects::TargetError;

/// Result type alias for site-deploy operations
pub type SiteDeployResult<T> = Result<T, SiteDeployError>;

/// Main error type for site-deploy operations
#[derive(Error, Debug)]
pub enum SiteDeployError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fs(#[from] FsError),

    #[error(transparent)]
    Target(#[from] TargetError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Store(#[from] DomainStoreError),

    #[error(transparent)]
    Domain(#[from] DomainRecordError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Hosting(#[from] HostingError),

    /// The user declined a confirmation prompt
    #[error("operation aborted by user")]
    Aborted,
}
