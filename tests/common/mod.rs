//! Common test utilities for site-deploy CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated environment with scratch home, staging and live roots
//! - `TestResult`: Captured output of one CLI run

pub mod env;

pub use env::*;
