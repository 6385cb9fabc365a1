//! Subcommand implementations.

pub mod fixtures;
pub mod quote;
