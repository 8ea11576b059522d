//! Domain record entity
//!
//! A registered website domain and, once it is hosted, the live server it
//! is served from.

use std::fmt;

use chrono::NaiveDate;

/// Lifecycle status of a domain record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DomainStatus {
    #[default]
    Active,
    Inactive,
}

impl DomainStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DomainStatus::Active => "Active",
            DomainStatus::Inactive => "Inactive",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Some(DomainStatus::Active),
            "inactive" => Some(DomainStatus::Inactive),
            _ => None,
        }
    }
}

impl fmt::Display for DomainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hosting details of a domain served from a live host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedSite {
    pub id: u32,
    pub provider: String,
    pub renewal_date: NaiveDate,
    /// Host id of the live server (a key of the configured hosts)
    pub server: String,
}

/// A registered domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRecord {
    pub id: u32,
    pub name: String,
    pub status: DomainStatus,
    pub hosted_site: Option<HostedSite>,
}

impl DomainRecord {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: DomainStatus::Active,
            hosted_site: None,
        }
    }

    pub fn is_hosted(&self) -> bool {
        self.hosted_site.is_some()
    }

    /// Live server id, if the domain is hosted
    pub fn server(&self) -> Option<&str> {
        self.hosted_site.as_ref().map(|site| site.server.as_str())
    }
}
