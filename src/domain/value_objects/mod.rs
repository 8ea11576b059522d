//! Domain Value Objects
//!
//! Immutable value types that represent deployment concepts.

mod deploy_phase;
mod deployment_target;
mod exclusion_rules;
mod file_mapping;

pub use deploy_phase::DeployPhase;
pub use deployment_target::{validate_domain_name, DeploymentTarget, TargetError};
pub use exclusion_rules::{ExclusionRules, DEFAULT_EXCLUSIONS};
pub use file_mapping::FileMapping;
