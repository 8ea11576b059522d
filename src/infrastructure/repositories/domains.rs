//! TOML Domain Repository
//!
//! Persists the domain registry at `~/.site-deploy/domains.toml`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::config::Settings;
use crate::domain::entities::{DomainRecord, DomainRegistry, DomainStatus, HostedSite};
use crate::domain::ports::{DomainRepository, DomainStoreError};
use crate::infrastructure::fs::{expand_tilde, site_deploy_home_dir};

const DEFAULT_REGISTRY_PATH: &str = "~/.site-deploy/domains.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlHostedSite {
    id: u32,
    provider: String,
    renewal_date: NaiveDate,
    server: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlDomain {
    id: u32,
    name: String,
    #[serde(default = "default_status")]
    status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hosted_site: Option<TomlHostedSite>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlDomains {
    version: u32,
    #[serde(default)]
    domains: Vec<TomlDomain>,
}

fn default_status() -> String {
    DomainStatus::Active.as_str().to_string()
}

pub struct TomlDomainRepository {
    path: PathBuf,
}

impl TomlDomainRepository {
    /// Repository at the configured registry path, or the default location
    pub fn from_settings(settings: &Settings) -> Result<Self, DomainStoreError> {
        let home = site_deploy_home_dir();
        let path = registry_path(settings.registry.path.as_deref(), home.as_deref())?;
        Ok(Self { path })
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    /// Take the exclusive lock; released when the returned file is dropped
    fn lock(&self) -> Result<fs::File, DomainStoreError> {
        let lock_path = self.lock_path();
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).map_err(access_error)?;
        }
        let lock_file = fs::File::create(&lock_path).map_err(access_error)?;
        lock_file.lock_exclusive().map_err(access_error)?;
        Ok(lock_file)
    }

    fn load_from_disk(&self) -> Result<DomainRegistry, DomainStoreError> {
        if !self.path.exists() {
            return Ok(DomainRegistry::new());
        }

        let content = fs::read_to_string(&self.path).map_err(access_error)?;
        let stored: TomlDomains =
            toml::from_str(&content).map_err(|e| DomainStoreError::Corrupted {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        from_toml(stored).map_err(|message| DomainStoreError::Corrupted {
            path: self.path.clone(),
            message,
        })
    }

    /// Write through a temp file in the same directory and rename it into place
    fn save_to_disk(&self, registry: &DomainRegistry) -> Result<(), DomainStoreError> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(access_error)?;

        let content = toml::to_string_pretty(&to_toml(registry)).map_err(|e| {
            DomainStoreError::SerializationError {
                message: e.to_string(),
            }
        })?;
        let mut tmp = NamedTempFile::new_in(parent).map_err(access_error)?;
        tmp.write_all(content.as_bytes()).map_err(access_error)?;
        tmp.persist(&self.path).map_err(|e| access_error(e.error))?;
        tracing::debug!(
            path = %self.path.display(),
            count = registry.domains.len(),
            "domain registry saved"
        );
        Ok(())
    }
}

impl DomainRepository for TomlDomainRepository {
    fn load(&self) -> Result<DomainRegistry, DomainStoreError> {
        self.load_from_disk()
    }

    fn save(&self, registry: &DomainRegistry) -> Result<(), DomainStoreError> {
        let lock_file = self.lock()?;
        let result = self.save_to_disk(registry);
        let _ = lock_file.unlock();
        result
    }

    fn update<T, F>(&self, change: F) -> Result<T, DomainStoreError>
    where
        F: FnOnce(&mut DomainRegistry) -> T,
    {
        let lock_file = self.lock()?;
        let result = self.load_from_disk().and_then(|mut registry| {
            let out = change(&mut registry);
            self.save_to_disk(&registry).map(|()| out)
        });
        let _ = lock_file.unlock();
        result
    }
}

fn access_error(e: std::io::Error) -> DomainStoreError {
    DomainStoreError::AccessError {
        message: e.to_string(),
    }
}

/// Resolve the registry location; a `~` path needs a known home directory.
fn registry_path(
    configured: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, DomainStoreError> {
    let path = configured.unwrap_or(Path::new(DEFAULT_REGISTRY_PATH));
    match home {
        Some(home) => Ok(expand_tilde(path, Some(home))),
        None if path.starts_with("~") => Err(DomainStoreError::AccessError {
            message: format!(
                "no home directory to resolve {}; set [registry] path or SITE_DEPLOY_REGISTRY",
                path.display()
            ),
        }),
        None => Ok(path.to_path_buf()),
    }
}

fn from_toml(stored: TomlDomains) -> Result<DomainRegistry, String> {
    let mut registry = DomainRegistry::new();
    registry.version = stored.version;
    for domain in stored.domains {
        let status = DomainStatus::parse(&domain.status)
            .ok_or_else(|| format!("unknown status '{}' for {}", domain.status, domain.name))?;
        registry.domains.push(DomainRecord {
            id: domain.id,
            name: domain.name,
            status,
            hosted_site: domain.hosted_site.map(|site| HostedSite {
                id: site.id,
                provider: site.provider,
                renewal_date: site.renewal_date,
                server: site.server,
            }),
        });
    }
    Ok(registry)
}

fn to_toml(registry: &DomainRegistry) -> TomlDomains {
    TomlDomains {
        version: registry.version,
        domains: registry
            .domains
            .iter()
            .map(|d| TomlDomain {
                id: d.id,
                name: d.name.clone(),
                status: d.status.as_str().to_string(),
                hosted_site: d.hosted_site.as_ref().map(|site| TomlHostedSite {
                    id: site.id,
                    provider: site.provider.clone(),
                    renewal_date: site.renewal_date,
                    server: site.server.clone(),
                }),
            })
            .collect(),
    }
}
