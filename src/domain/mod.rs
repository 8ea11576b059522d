//! Domain Layer
//!
//! Pure deployment logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Domain records and the registry that holds them
//! - `value_objects/` - Immutable value types (DeploymentTarget, ExclusionRules, FileMapping)
//! - `services/` - Stateless services (PathPlanner)
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches a filesystem or network directly
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
