//! Command handlers
//!
//! Each handler loads what it needs through the factory, runs the use case
//! and renders the outcome as text or NDJSON.

pub mod deploy;
pub mod domains;
pub mod hosts;

use std::path::Path;

use anyhow::{Context, Result};
use dialoguer::Confirm;

use site_deploy::config::{LoadedSettings, Settings};

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::theme;

/// Discover the config file with `SITE_DEPLOY_*` overrides applied
pub fn load_settings(explicit: Option<&Path>) -> Result<LoadedSettings> {
    let loaded = Settings::discover(explicit).context("failed to load configuration")?;
    if let Some(path) = &loaded.source {
        tracing::info!(path = %path.display(), "using configuration");
    }
    Ok(loaded)
}

pub fn print_config_warnings(loaded: &LoadedSettings, ui: &UiContext) {
    if ui.json {
        for warning in &loaded.warnings {
            tracing::warn!(
                key = %warning.key,
                file = %warning.file.display(),
                "unknown config key"
            );
        }
        return;
    }

    for warning in &loaded.warnings {
        let mut text = format!(
            "unknown config key '{}' in {}",
            warning.key,
            warning.file.display()
        );
        if let Some(line) = warning.line {
            text.push_str(&format!(":{line}"));
        }
        if let Some(suggestion) = &warning.suggestion {
            text.push_str(&format!(" (did you mean '{suggestion}'?)"));
        }
        eprintln!("{} {}", Icon::Warning.colored(ui.color, ui.unicode), text);
    }
}

/// Ask before a destructive step; `--yes` and non-interactive runs skip the prompt
pub fn confirm(ui: &UiContext, yes: bool, prompt: &str) -> Result<bool> {
    if yes || !ui.can_prompt() {
        return Ok(true);
    }
    let theme = theme::prompt_theme(ui.color);
    Confirm::with_theme(theme.as_ref())
        .with_prompt(prompt)
        .default(false)
        .interact()
        .context("failed to read confirmation")
}
