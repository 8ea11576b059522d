//! Terminal output for the CLI

pub mod blocks;
pub mod context;
pub mod error;
pub mod events;
pub mod primitives;
pub mod terminal;
pub mod theme;
pub mod views;
