//! Tooling & Integration Layer
//!
//! The command-line surface over the generators and its output formatting.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands};
