//! Domain Ports
//!
//! Interfaces the domain and application layers depend on. Infrastructure
//! provides the implementations.

pub mod deploy_events;
pub mod domain_repository;
pub mod file_access;
pub mod session_provider;

pub use deploy_events::{DeployEvent, DeployEventSink, NoopEventSink};
pub use domain_repository::{DomainRepository, DomainStoreError};
pub use file_access::{FileAccessSession, FsError, FsResult, ScopedSession};
pub use session_provider::{SessionError, SessionProvider};
