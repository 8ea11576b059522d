//! Domain registry entity
//!
//! The full set of registered domains, with the bookkeeping rules for adding,
//! removing, looking up and hosting them.

use chrono::NaiveDate;

use super::domain_record::{DomainRecord, HostedSite};
use crate::domain::value_objects::validate_domain_name;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainRecordError {
    #[error("invalid domain name '{0}'")]
    InvalidName(String),

    #[error("domain '{0}' is already registered")]
    Duplicate(String),

    #[error("domain '{0}' not found")]
    NotFound(String),

    #[error("domain '{0}' already has a hosted site on '{1}'")]
    AlreadyHosted(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRegistry {
    pub version: u32,
    pub domains: Vec<DomainRecord>,
}

impl Default for DomainRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainRegistry {
    pub fn new() -> Self {
        Self {
            version: 1,
            domains: Vec::new(),
        }
    }

    pub fn all(&self) -> &[DomainRecord] {
        &self.domains
    }

    /// Register a new domain with the next free id.
    pub fn add(&mut self, name: &str) -> Result<&DomainRecord, DomainRecordError> {
        let name = name.trim();
        if validate_domain_name(name).is_err() || name.chars().any(char::is_whitespace) {
            return Err(DomainRecordError::InvalidName(name.to_string()));
        }
        if self.find_by_name(name).is_some() {
            return Err(DomainRecordError::Duplicate(name.to_string()));
        }

        let id = self.domains.iter().map(|d| d.id).max().unwrap_or(0) + 1;
        self.domains.push(DomainRecord::new(id, name));
        Ok(&self.domains[self.domains.len() - 1])
    }

    /// Remove a domain by id, returning it if it existed.
    pub fn remove(&mut self, id: u32) -> Option<DomainRecord> {
        let index = self.domains.iter().position(|d| d.id == id)?;
        Some(self.domains.remove(index))
    }

    /// Look a domain up by numeric id or by name (case-insensitive).
    pub fn find(&self, name_or_id: &str) -> Option<&DomainRecord> {
        let key = name_or_id.trim();
        match key.parse::<u32>() {
            Ok(id) => self.domains.iter().find(|d| d.id == id),
            Err(_) => self.find_by_name(key),
        }
    }

    fn find_by_name(&self, name: &str) -> Option<&DomainRecord> {
        self.domains
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
    }

    /// Number of domains hosted on `server`
    pub fn hosted_count(&self, server: &str) -> usize {
        self.domains
            .iter()
            .filter(|d| d.server() == Some(server))
            .count()
    }

    /// Attach hosting details to a domain that has none.
    pub fn assign_hosted_site(
        &mut self,
        name_or_id: &str,
        server: &str,
        provider: &str,
        renewal_date: NaiveDate,
    ) -> Result<&DomainRecord, DomainRecordError> {
        let id = self
            .find(name_or_id)
            .map(|d| d.id)
            .ok_or_else(|| DomainRecordError::NotFound(name_or_id.to_string()))?;

        let next_site_id = self
            .domains
            .iter()
            .filter_map(|d| d.hosted_site.as_ref().map(|s| s.id))
            .max()
            .unwrap_or(0)
            + 1;

        let index = self
            .domains
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| DomainRecordError::NotFound(name_or_id.to_string()))?;
        let record = &mut self.domains[index];
        if let Some(existing) = &record.hosted_site {
            return Err(DomainRecordError::AlreadyHosted(
                record.name.clone(),
                existing.server.clone(),
            ));
        }

        record.hosted_site = Some(HostedSite {
            id: next_site_id,
            provider: provider.to_string(),
            renewal_date,
            server: server.to_string(),
        });
        Ok(&self.domains[index])
    }
}
