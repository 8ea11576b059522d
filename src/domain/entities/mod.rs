//! Domain Entities
//!
//! Core entities with identity and lifecycle.

mod domain_record;
mod domain_registry;

pub use domain_record::{DomainRecord, DomainStatus, HostedSite};
pub use domain_registry::{DomainRecordError, DomainRegistry};
