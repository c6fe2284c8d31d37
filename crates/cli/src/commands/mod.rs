//! Subcommand implementations.

pub mod orders;
pub mod password;
