//! Session provider backed by the configured hosts

use crate::config::{Settings, Transport};
use crate::domain::ports::{FileAccessSession, SessionError, SessionProvider};

use super::fs::{LocalSession, SshSession};

/// Opens local or ssh sessions according to `[hosts.*]`
pub struct SettingsSessionProvider<'a> {
    settings: &'a Settings,
    ssh_program: String,
}

impl<'a> SettingsSessionProvider<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            ssh_program: "ssh".to_string(),
        }
    }

    /// Use another ssh client binary for ssh hosts
    pub fn with_ssh_program(mut self, program: impl Into<String>) -> Self {
        self.ssh_program = program.into();
        self
    }
}

impl SessionProvider for SettingsSessionProvider<'_> {
    fn open(&self, host: &str) -> Result<Box<dyn FileAccessSession>, SessionError> {
        let config = self
            .settings
            .host(host)
            .ok_or_else(|| SessionError::UnknownHost(host.to_string()))?;

        tracing::debug!(%host, transport = config.transport.as_str(), "opening session");
        match config.transport {
            Transport::Local => Ok(Box::new(LocalSession::new(host))),
            Transport::Ssh => {
                let destination = config
                    .ssh
                    .as_deref()
                    .filter(|d| !d.trim().is_empty())
                    .ok_or_else(|| SessionError::MissingCredentials {
                        host: host.to_string(),
                    })?;
                let session = SshSession::new(host, destination)
                    .with_program(&self.ssh_program)
                    .connect()
                    .inspect_err(|e| {
                        tracing::warn!(%host, error = %e, "ssh host unreachable");
                    })?;
                Ok(Box::new(session))
            }
        }
    }
}
