//! Spice: Agents, Profiles and Skills Administration
//!
//! State logic behind the agents console: skill-selection reconciliation,
//! cascading namespace option loading, profile and agent skill synchronization,
//! and the predicate-row editor, with an HTTP adapter for the admin server.

pub mod client;
pub mod config;
pub mod console;
pub mod directory;
pub mod error;
pub mod logging;
pub mod predicate;
pub mod skill;
pub mod tooling;

pub use error::{ApiError, EditorError};
