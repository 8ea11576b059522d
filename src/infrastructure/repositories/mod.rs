//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod domains;

pub use domains::TomlDomainRepository;
