//! Hosting a domain
//!
//! Assigns a live server to a registered domain and creates the domain's
//! staging directory so files can be staged for its first deployment.

use std::path::PathBuf;

use chrono::{Months, NaiveDate};

use crate::config::{ConfigError, Settings};
use crate::domain::entities::{DomainRecord, DomainRecordError, DomainRegistry};
use crate::domain::ports::{
    DomainRepository, DomainStoreError, FileAccessSession, FsError, ScopedSession, SessionError,
    SessionProvider,
};

/// Provider recorded for sites served from configured hosts
pub const DEFAULT_PROVIDER: &str = "self-hosted";

#[derive(Debug, thiserror::Error)]
pub enum HostingError {
    #[error("no live hosts are configured")]
    NoLiveHosts,

    #[error("'{0}' is not a configured live host")]
    UnknownServer(String),

    #[error("failed to create staging directory {}: {source}", path.display())]
    StagingDirectory {
        path: PathBuf,
        #[source]
        source: FsError,
    },

    #[error(transparent)]
    Record(#[from] DomainRecordError),

    #[error(transparent)]
    Store(#[from] DomainStoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// What `host_domain` did
#[derive(Debug, Clone)]
pub struct HostingOutcome {
    pub record: DomainRecord,
    pub server: String,
    pub staging_dir: PathBuf,
    /// False when the staging directory already existed
    pub created_staging_dir: bool,
}

/// Pick the live server for a new site.
///
/// An explicit request must name a configured live host. Otherwise the live
/// host serving the fewest domains wins, ties broken by host id.
pub fn choose_server(
    registry: &DomainRegistry,
    settings: &Settings,
    requested: Option<&str>,
) -> Result<String, HostingError> {
    if let Some(server) = requested {
        if !settings.is_live_host(server) {
            return Err(HostingError::UnknownServer(server.to_string()));
        }
        return Ok(server.to_string());
    }

    settings
        .live_hosts()
        .map(|(id, _)| (registry.hosted_count(id), id))
        .min()
        .map(|(_, id)| id.to_string())
        .ok_or(HostingError::NoLiveHosts)
}

/// Renewal date recorded for a site hosted on `today`
pub fn renewal_date(today: NaiveDate) -> NaiveDate {
    today.checked_add_months(Months::new(12)).unwrap_or(today)
}

/// Host `name_or_id` on `server` (or the least loaded live host).
pub fn host_domain<R, P>(
    repository: &R,
    sessions: &P,
    settings: &Settings,
    name_or_id: &str,
    server: Option<&str>,
    today: NaiveDate,
) -> Result<HostingOutcome, HostingError>
where
    R: DomainRepository,
    P: SessionProvider + ?Sized,
{
    let registry = repository.load()?;
    let record = registry
        .find(name_or_id)
        .ok_or_else(|| DomainRecordError::NotFound(name_or_id.trim().to_string()))?;
    if let Some(existing) = record.server() {
        return Err(
            DomainRecordError::AlreadyHosted(record.name.clone(), existing.to_string()).into(),
        );
    }
    let name = record.name.clone();
    let server = choose_server(&registry, settings, server)?;

    let staging_dir = settings.staging()?.root.join(&name);
    let session = ScopedSession::new(sessions.open(&settings.staging_host)?);
    let created_staging_dir = !session.exists(&staging_dir);
    if created_staging_dir {
        session
            .create_dir(&staging_dir)
            .map_err(|source| HostingError::StagingDirectory {
                path: staging_dir.clone(),
                source,
            })?;
    }
    drop(session);

    let record = repository.update(|registry| {
        registry
            .assign_hosted_site(&name, &server, DEFAULT_PROVIDER, renewal_date(today))
            .cloned()
    })??;
    tracing::info!(domain = %record.name, %server, "domain hosted");

    Ok(HostingOutcome {
        record,
        server,
        staging_dir,
        created_staging_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HostConfig;
    use crate::testing::{MemoryDomainRepository, MemoryHost, MemorySessionProvider};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
    }

    fn settings() -> Settings {
        let mut settings = Settings::default();
        for (id, root) in [
            ("staging", "/srv/staging"),
            ("az102", "/srv/az102"),
            ("az201", "/srv/az201"),
        ] {
            settings.hosts.insert(id.to_string(), HostConfig::local(root));
        }
        settings
    }

    fn repository(names: &[&str]) -> MemoryDomainRepository {
        let repo = MemoryDomainRepository::default();
        repo.update(|registry| {
            for name in names {
                registry.add(name).unwrap();
            }
        })
        .unwrap();
        repo
    }

    #[test]
    fn least_loaded_server_wins_with_ties_by_id() {
        let settings = settings();
        let mut registry = DomainRegistry::new();
        registry.add("a.com").unwrap();

        assert_eq!(choose_server(&registry, &settings, None).unwrap(), "az102");

        registry
            .assign_hosted_site("a.com", "az102", DEFAULT_PROVIDER, today())
            .unwrap();
        assert_eq!(choose_server(&registry, &settings, None).unwrap(), "az201");
    }

    #[test]
    fn requested_server_must_be_live() {
        let settings = settings();
        let registry = DomainRegistry::new();

        assert_eq!(
            choose_server(&registry, &settings, Some("az201")).unwrap(),
            "az201"
        );
        assert!(matches!(
            choose_server(&registry, &settings, Some("staging")),
            Err(HostingError::UnknownServer(_))
        ));
        assert!(matches!(
            choose_server(&registry, &settings, Some("az999")),
            Err(HostingError::UnknownServer(_))
        ));
    }

    #[test]
    fn no_live_hosts() {
        let mut settings = Settings::default();
        settings
            .hosts
            .insert("staging".to_string(), HostConfig::local("/srv/staging"));
        assert!(matches!(
            choose_server(&DomainRegistry::new(), &settings, None),
            Err(HostingError::NoLiveHosts)
        ));
    }

    #[test]
    fn renewal_is_one_year_out() {
        assert_eq!(
            renewal_date(today()),
            NaiveDate::from_ymd_opt(2027, 3, 15).unwrap()
        );
    }

    #[test]
    fn host_domain_records_site_and_creates_staging_dir() {
        let repo = repository(&["site.com"]);
        let staging = MemoryHost::new();
        let sessions = MemorySessionProvider::default().with_host("staging", &staging);

        let outcome =
            host_domain(&repo, &sessions, &settings(), "site.com", None, today()).unwrap();

        assert_eq!(outcome.server, "az102");
        assert!(outcome.created_staging_dir);
        assert!(staging.has_dir("/srv/staging/site.com"));
        assert_eq!(staging.closes(), 1);

        let site = outcome.record.hosted_site.unwrap();
        assert_eq!(site.provider, "self-hosted");
        assert_eq!(site.server, "az102");
        assert_eq!(site.renewal_date, NaiveDate::from_ymd_opt(2027, 3, 15).unwrap());

        let stored = repo.load().unwrap();
        assert_eq!(stored.find("site.com").unwrap().server(), Some("az102"));
    }

    #[test]
    fn existing_staging_dir_is_kept() {
        let repo = repository(&["site.com"]);
        let staging = MemoryHost::new();
        staging.put_file("/srv/staging/site.com/index.html", "hi");
        let sessions = MemorySessionProvider::default().with_host("staging", &staging);

        let outcome =
            host_domain(&repo, &sessions, &settings(), "1", Some("az201"), today()).unwrap();

        assert!(!outcome.created_staging_dir);
        assert_eq!(outcome.server, "az201");
        assert_eq!(
            staging.read("/srv/staging/site.com/index.html").as_deref(),
            Some("hi")
        );
    }

    #[test]
    fn already_hosted_domain_is_rejected() {
        let repo = repository(&["site.com"]);
        let staging = MemoryHost::new();
        let sessions = MemorySessionProvider::default().with_host("staging", &staging);
        host_domain(&repo, &sessions, &settings(), "site.com", None, today()).unwrap();

        let err =
            host_domain(&repo, &sessions, &settings(), "site.com", None, today()).unwrap_err();

        assert!(matches!(
            err,
            HostingError::Record(DomainRecordError::AlreadyHosted(_, _))
        ));
    }

    #[test]
    fn staging_failure_leaves_record_unhosted() {
        let repo = repository(&["site.com"]);
        let staging = MemoryHost::new();
        staging.fail_create_dir("/srv/staging/site.com");
        let sessions = MemorySessionProvider::default().with_host("staging", &staging);

        let err =
            host_domain(&repo, &sessions, &settings(), "site.com", None, today()).unwrap_err();

        assert!(matches!(err, HostingError::StagingDirectory { .. }));
        assert!(!repo.load().unwrap().find("site.com").unwrap().is_hosted());
    }

    #[test]
    fn unknown_domain() {
        let repo = repository(&[]);
        let sessions = MemorySessionProvider::default();

        let err =
            host_domain(&repo, &sessions, &settings(), "ghost.com", None, today()).unwrap_err();

        assert!(matches!(
            err,
            HostingError::Record(DomainRecordError::NotFound(_))
        ));
    }
}
