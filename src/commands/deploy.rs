//! Deploy command handler

use std::sync::Arc;

use anyhow::{Context, Result};

use site_deploy::application::resolve_target;
use site_deploy::config::Settings;
use site_deploy::domain::ports::{DeployEventSink, FileAccessSession, SessionProvider};
use site_deploy::infrastructure::JsonEventSink;
use site_deploy::presentation::factory;
use site_deploy::SiteDeployError;

use crate::ui::context::UiContext;
use crate::ui::events::ConsoleEventSink;
use crate::ui::views::deploy::{render_deploy_header, render_deploy_summary};

/// Deploy `name_or_id`; returns whether the deployment succeeded
pub fn cmd_deploy(
    settings: &Settings,
    ui: &UiContext,
    name_or_id: &str,
    strict: bool,
    yes: bool,
) -> Result<bool> {
    settings.validate()?;
    let repository = factory::create_domain_repository(settings)?;
    let resolved = resolve_target(&repository, settings, name_or_id)?;
    let strict = strict || settings.deploy.strict;

    if !ui.json {
        print!(
            "{}",
            render_deploy_header(&resolved, strict, ui.color, ui.unicode)
        );
    }

    let prompt = format!(
        "Replace the live site of {} on {}?",
        resolved.target.domain(),
        resolved.live_host
    );
    if !super::confirm(ui, yes, &prompt)? {
        return Err(SiteDeployError::Aborted.into());
    }

    let sessions = factory::create_session_provider(settings);
    let mut source = sessions
        .open(&resolved.staging_host)
        .with_context(|| format!("failed to open session on {}", resolved.staging_host))?;
    let destination = match sessions.open(&resolved.live_host) {
        Ok(session) => session,
        Err(e) => {
            source.close();
            return Err(e)
                .with_context(|| format!("failed to open session on {}", resolved.live_host));
        }
    };

    let events: Arc<dyn DeployEventSink> = if ui.json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(ConsoleEventSink::stdout(ui))
    };
    let orchestrator = factory::create_orchestrator(settings, strict, events);
    let result = orchestrator.run(&resolved.target, source, destination);

    tracing::info!(
        domain = %result.domain,
        success = result.success,
        copied = result.copied_count(),
        "deployment finished"
    );
    if !ui.json {
        print!(
            "{}",
            render_deploy_summary(&result, ui.verbose, ui.color, ui.unicode)
        );
    }
    Ok(result.is_success())
}
