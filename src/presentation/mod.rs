//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//!
//! ## Structure
//!
//! - `cli` - Command line definition
//! - `factory` - Creates use cases with proper dependencies (dependency injection)

pub mod cli;
pub mod factory;

pub use cli::{Cli, ColorWhen, Commands, DomainsCommand};
pub use factory::{create_domain_repository, create_orchestrator, create_session_provider};
