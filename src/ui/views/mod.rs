pub mod deploy;
pub mod domains;
pub mod hosts;
