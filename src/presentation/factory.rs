//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::sync::Arc;

use crate::application::DeploymentOrchestrator;
use crate::config::Settings;
use crate::domain::ports::{DeployEventSink, DomainStoreError};
use crate::infrastructure::{SettingsSessionProvider, TomlDomainRepository};

/// Domain registry at the configured (or default) location
pub fn create_domain_repository(
    settings: &Settings,
) -> Result<TomlDomainRepository, DomainStoreError> {
    TomlDomainRepository::from_settings(settings)
}

/// Sessions for the configured hosts
pub fn create_session_provider(settings: &Settings) -> SettingsSessionProvider<'_> {
    SettingsSessionProvider::new(settings)
}

/// Orchestrator configured from `[deploy]`, with `strict` forced on when requested
pub fn create_orchestrator(
    settings: &Settings,
    strict: bool,
    events: Arc<dyn DeployEventSink>,
) -> DeploymentOrchestrator {
    let options = settings.deploy.options();
    let strict = strict || options.strict;
    DeploymentOrchestrator::new(options.with_strict(strict)).with_events(events)
}
