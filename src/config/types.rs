//! Configuration type definitions

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::application::deploy::{DeployOptions, DEFAULT_BUFFER_SIZE};
use crate::domain::value_objects::{ExclusionRules, DEFAULT_EXCLUSIONS};
use crate::error::SiteDeployResult;

use super::loader::{self, ConfigWarning, LoadedSettings};

/// Configuration problems that make a command impossible to run
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config file {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("staging host '{0}' is not configured (add a [hosts.{0}] section)")]
    MissingStagingHost(String),

    #[error("host '{host}' uses ssh transport but has no `ssh` target")]
    MissingSshTarget { host: String },

    #[error("deploy.buffer_size must be greater than zero")]
    ZeroBufferSize,

    #[error("deploy.rollback_dir must be a plain directory name, got '{0}'")]
    InvalidRollbackDir(String),
}

/// How a host's filesystem is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// Directly on this machine
    #[default]
    Local,
    /// Through the `ssh` binary
    Ssh,
}

impl Transport {
    pub fn as_str(self) -> &'static str {
        match self {
            Transport::Local => "local",
            Transport::Ssh => "ssh",
        }
    }
}

/// One staging or live host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Directory holding one subdirectory per domain
    pub root: PathBuf,

    #[serde(default)]
    pub transport: Transport,

    /// `user@host` passed to ssh
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh: Option<String>,
}

impl HostConfig {
    pub fn local(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            transport: Transport::Local,
            ssh: None,
        }
    }
}

/// `[deploy]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploySettings {
    /// Backup root, relative to the live host root
    #[serde(default = "default_rollback_dir")]
    pub rollback_dir: String,

    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    #[serde(default)]
    pub strict: bool,
}

impl Default for DeploySettings {
    fn default() -> Self {
        Self {
            rollback_dir: default_rollback_dir(),
            exclude: default_exclude(),
            buffer_size: default_buffer_size(),
            strict: false,
        }
    }
}

impl DeploySettings {
    pub fn options(&self) -> DeployOptions {
        DeployOptions::new()
            .with_exclusions(ExclusionRules::new(&self.exclude))
            .with_buffer_size(self.buffer_size)
            .with_strict(self.strict)
    }
}

fn default_rollback_dir() -> String {
    "Rollback".to_string()
}

fn default_exclude() -> Vec<String> {
    DEFAULT_EXCLUSIONS.iter().map(|s| s.to_string()).collect()
}

fn default_buffer_size() -> usize {
    DEFAULT_BUFFER_SIZE
}

/// `[registry]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySettings {
    /// Domain record file; `~/.site-deploy/domains.toml` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// `[output]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub color: ColorMode,

    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            color: ColorMode::default(),
            unicode: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_staging_host() -> String {
    "staging".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Host id the staged sites are read from
    #[serde(default = "default_staging_host")]
    pub staging_host: String,

    #[serde(default)]
    pub hosts: BTreeMap<String, HostConfig>,

    #[serde(default)]
    pub deploy: DeploySettings,

    #[serde(default)]
    pub registry: RegistrySettings,

    #[serde(default)]
    pub output: OutputSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            staging_host: default_staging_host(),
            hosts: BTreeMap::new(),
            deploy: DeploySettings::default(),
            registry: RegistrySettings::default(),
            output: OutputSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load(path: &Path) -> SiteDeployResult<Self> {
        let (settings, _warnings) = loader::load_with_warnings(path)?;
        Ok(settings)
    }

    /// Load settings and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> SiteDeployResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Find and load the settings file, then apply environment overrides.
    pub fn discover(explicit: Option<&Path>) -> SiteDeployResult<LoadedSettings> {
        loader::discover(explicit)
    }

    /// Apply environment variable overrides (SITE_DEPLOY_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Check the settings needed to deploy or host a domain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.hosts.contains_key(&self.staging_host) {
            return Err(ConfigError::MissingStagingHost(self.staging_host.clone()));
        }
        if self.deploy.buffer_size == 0 {
            return Err(ConfigError::ZeroBufferSize);
        }
        let rollback = Path::new(&self.deploy.rollback_dir);
        let plain = rollback.components().count() == 1
            && matches!(
                rollback.components().next(),
                Some(std::path::Component::Normal(_))
            );
        if !plain {
            return Err(ConfigError::InvalidRollbackDir(
                self.deploy.rollback_dir.clone(),
            ));
        }
        for (id, host) in &self.hosts {
            if host.transport == Transport::Ssh && host.ssh.is_none() {
                return Err(ConfigError::MissingSshTarget { host: id.clone() });
            }
        }
        Ok(())
    }

    pub fn host(&self, id: &str) -> Option<&HostConfig> {
        self.hosts.get(id)
    }

    pub fn staging(&self) -> Result<&HostConfig, ConfigError> {
        self.host(&self.staging_host)
            .ok_or_else(|| ConfigError::MissingStagingHost(self.staging_host.clone()))
    }

    /// Whether `id` names a configured host other than staging
    pub fn is_live_host(&self, id: &str) -> bool {
        id != self.staging_host && self.hosts.contains_key(id)
    }

    /// Configured hosts other than staging, sorted by id
    pub fn live_hosts(&self) -> impl Iterator<Item = (&str, &HostConfig)> {
        self.hosts
            .iter()
            .filter(move |(id, _)| **id != self.staging_host)
            .map(|(id, host)| (id.as_str(), host))
    }

    /// Backup root on a live host
    pub fn backup_root(&self, live: &HostConfig) -> PathBuf {
        live.root.join(&self.deploy.rollback_dir)
    }
}
