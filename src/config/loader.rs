//! Settings discovery and loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{SiteDeployError, SiteDeployResult};

use super::types::{ConfigError, Settings};

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "site-deploy.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Settings together with where they came from
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub settings: Settings,
    /// `None` when built-in defaults were used
    pub source: Option<PathBuf>,
    pub warnings: Vec<ConfigWarning>,
}

/// Load settings and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> SiteDeployResult<(Settings, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|source| SiteDeployError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let settings: Settings = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
                key,
                file: path.to_path_buf(),
            }
        })
        .collect();

    Ok((settings, warnings))
}

/// Candidate settings files, most specific first
pub fn search_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    if let Some(path) = explicit {
        return vec![path.to_path_buf()];
    }
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("site-deploy").join("config.toml"));
    }
    paths
}

/// Load from `--config`, the working directory, the user config dir, or defaults.
///
/// An explicit path must exist; the implicit locations are skipped when absent.
pub fn discover(explicit: Option<&Path>) -> SiteDeployResult<LoadedSettings> {
    for path in search_paths(explicit) {
        if explicit.is_none() && !path.exists() {
            continue;
        }
        tracing::debug!(path = %path.display(), "loading settings");
        let (settings, warnings) = load_with_warnings(&path)?;
        return Ok(LoadedSettings {
            settings: with_env_overrides(settings),
            source: Some(path),
            warnings,
        });
    }

    tracing::debug!("no settings file found, using defaults");
    Ok(LoadedSettings {
        settings: with_env_overrides(Settings::default()),
        source: None,
        warnings: Vec::new(),
    })
}

/// Apply environment variable overrides (SITE_DEPLOY_* prefix)
pub fn with_env_overrides(settings: Settings) -> Settings {
    apply_overrides(settings, |key| std::env::var(key).ok())
}

pub(crate) fn apply_overrides<F>(mut settings: Settings, var: F) -> Settings
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = var("SITE_DEPLOY_STAGING_HOST") {
        if !host.trim().is_empty() {
            settings.staging_host = host.trim().to_string();
        }
    }

    if let Some(size) = var("SITE_DEPLOY_BUFFER_SIZE") {
        match size.trim().parse::<usize>() {
            Ok(size) => settings.deploy.buffer_size = size,
            Err(_) => tracing::warn!(value = %size, "ignoring invalid SITE_DEPLOY_BUFFER_SIZE"),
        }
    }

    // SITE_DEPLOY_EXCLUDE (comma-separated)
    if let Some(exclude) = var("SITE_DEPLOY_EXCLUDE") {
        settings.deploy.exclude = exclude
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
    }

    if let Some(strict) = var("SITE_DEPLOY_STRICT") {
        settings.deploy.strict = strict.to_lowercase() != "false" && strict != "0";
    }

    if let Some(path) = var("SITE_DEPLOY_REGISTRY") {
        if !path.trim().is_empty() {
            settings.registry.path = Some(PathBuf::from(path));
        }
    }

    settings
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "staging_host",
        "hosts",
        "root",
        "transport",
        "ssh",
        "deploy",
        "rollback_dir",
        "exclude",
        "buffer_size",
        "strict",
        "registry",
        "path",
        "output",
        "color",
        "unicode",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
