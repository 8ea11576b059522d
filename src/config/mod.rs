//! Configuration module for site-deploy
//!
//! Settings are resolved in this order:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (SITE_DEPLOY_*)
//! 3. `--config <path>`, else `./site-deploy.toml`, else
//!    `<config dir>/site-deploy/config.toml`
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{search_paths, ConfigWarning, LoadedSettings, LOCAL_CONFIG_FILE};
pub use types::{
    ColorMode, ConfigError, DeploySettings, HostConfig, OutputSettings, RegistrySettings,
    Settings, Transport,
};
