//! Tooling & Integration Layer
//!
//! Command-line access to the agents console.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
