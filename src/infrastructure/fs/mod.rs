//! File Access Implementations
//!
//! Concrete implementations of the FileAccessSession port.

mod home;
mod local;
mod remote;

pub use home::{expand_tilde, site_deploy_home_dir, SITE_DEPLOY_TEST_HOME_VAR};
pub use local::LocalSession;
pub use remote::SshSession;
