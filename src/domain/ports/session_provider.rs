//! SessionProvider port
//!
//! Opens a [`FileAccessSession`](super::FileAccessSession) for a configured
//! host. Opening is a precondition of a deployment, not part of it.

use super::file_access::FileAccessSession;

/// Failure to open a session
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("unknown host '{0}'")]
    UnknownHost(String),

    #[error("host '{host}' is missing its ssh destination")]
    MissingCredentials { host: String },

    #[error("cannot reach host '{host}': {message}")]
    Unreachable { host: String, message: String },
}

pub trait SessionProvider {
    /// Open an authenticated session bound to `host`
    fn open(&self, host: &str) -> Result<Box<dyn FileAccessSession>, SessionError>;
}
