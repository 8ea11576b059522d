//! Home directory resolution with test isolation support.
//!
//! `dirs::home_dir()` ignores `HOME` on Windows, so integration tests point
//! the tool at a scratch home through `SITE_DEPLOY_TEST_HOME` instead.

use std::path::{Path, PathBuf};

/// Environment variable for test isolation of home directory.
pub const SITE_DEPLOY_TEST_HOME_VAR: &str = "SITE_DEPLOY_TEST_HOME";

/// Home directory for tool-owned paths such as `~/.site-deploy/domains.toml`.
pub fn site_deploy_home_dir() -> Option<PathBuf> {
    std::env::var(SITE_DEPLOY_TEST_HOME_VAR)
        .ok()
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}

/// Expand a leading `~` against `home`.
pub fn expand_tilde(path: &Path, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return path.to_path_buf();
    };
    match path.strip_prefix("~") {
        Ok(rest) if rest.as_os_str().is_empty() => home.to_path_buf(),
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}
