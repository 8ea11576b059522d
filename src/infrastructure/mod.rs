//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - File access sessions (Local, Ssh)
//! - `session` - Session provider backed by the configured hosts
//! - `repositories/` - Repository implementations (domain registry)
//! - `events/` - Deploy event sinks (JSON)

pub mod events;
pub mod fs;
pub mod repositories;
pub mod session;

// Re-export for convenience
pub use events::JsonEventSink;
pub use fs::{LocalSession, SshSession};
pub use repositories::TomlDomainRepository;
pub use session::SettingsSessionProvider;
