//! Domains command handlers
//!
//! Manage the domain records kept in `~/.site-deploy/domains.toml`.

use anyhow::{Context, Result};
use chrono::Local;

use site_deploy::application::host_domain;
use site_deploy::config::Settings;
use site_deploy::domain::entities::{DomainRecord, DomainRecordError};
use site_deploy::domain::ports::DomainRepository;
use site_deploy::presentation::{factory, DomainsCommand};
use site_deploy::SiteDeployError;

use crate::ui::context::UiContext;
use crate::ui::views::domains::{
    render_domain_added, render_domain_hosted, render_domain_removed, DomainsView,
};

pub fn cmd_domains(settings: &Settings, ui: &UiContext, action: &DomainsCommand) -> Result<()> {
    let repository = factory::create_domain_repository(settings)?;
    tracing::debug!(path = %repository.path().display(), "domain registry");

    match action {
        DomainsCommand::List => {
            let registry = repository
                .load()
                .context("failed to load domain registry")?;
            if ui.json {
                let domains: Vec<_> = registry.all().iter().map(record_json).collect();
                println!("{}", serde_json::json!({ "event": "domains", "domains": domains }));
            } else {
                print!(
                    "{}",
                    DomainsView::new(registry.all(), repository.path()).render(ui.color, ui.unicode)
                );
            }
        }

        DomainsCommand::Add { name } => {
            let record = repository.update(|registry| registry.add(name).cloned())??;
            tracing::info!(domain = %record.name, id = record.id, "domain registered");
            emit_record(ui, "domain_added", &record, render_domain_added);
        }

        DomainsCommand::Remove { id, yes } => {
            let registry = repository.load()?;
            let record = registry
                .all()
                .iter()
                .find(|d| d.id == *id)
                .ok_or_else(|| DomainRecordError::NotFound(id.to_string()))?;

            let mut prompt = format!("Remove {} (id {})?", record.name, record.id);
            if let Some(server) = record.server() {
                prompt.push_str(&format!(" It is hosted on {server}; live files are not touched."));
            }
            if !super::confirm(ui, *yes, &prompt)? {
                return Err(SiteDeployError::Aborted.into());
            }

            let removed = repository
                .update(|registry| registry.remove(*id))?
                .ok_or_else(|| DomainRecordError::NotFound(id.to_string()))?;
            tracing::info!(domain = %removed.name, id = removed.id, "domain removed");
            emit_record(ui, "domain_removed", &removed, render_domain_removed);
        }

        DomainsCommand::Host { name_or_id, server } => {
            settings.validate()?;
            let sessions = factory::create_session_provider(settings);
            let outcome = host_domain(
                &repository,
                &sessions,
                settings,
                name_or_id,
                server.as_deref(),
                Local::now().date_naive(),
            )?;
            if ui.json {
                let mut json = record_json(&outcome.record);
                json["event"] = "domain_hosted".into();
                json["staging_dir"] = outcome.staging_dir.display().to_string().into();
                json["created_staging_dir"] = outcome.created_staging_dir.into();
                println!("{json}");
            } else {
                print!("{}", render_domain_hosted(&outcome, ui.color, ui.unicode));
            }
        }
    }
    Ok(())
}

fn emit_record(
    ui: &UiContext,
    event: &str,
    record: &DomainRecord,
    render: fn(&DomainRecord, bool, bool) -> String,
) {
    if ui.json {
        let mut json = record_json(record);
        json["event"] = event.into();
        println!("{json}");
    } else {
        print!("{}", render(record, ui.color, ui.unicode));
    }
}

fn record_json(record: &DomainRecord) -> serde_json::Value {
    serde_json::json!({
        "id": record.id,
        "name": record.name,
        "status": record.status.as_str(),
        "hosted_site": record.hosted_site.as_ref().map(|site| serde_json::json!({
            "id": site.id,
            "provider": site.provider,
            "server": site.server,
            "renewal_date": site.renewal_date.to_string(),
        })),
    })
}
