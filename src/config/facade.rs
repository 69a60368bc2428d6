//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::SpiceConfig;
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the global file and environment.
    pub fn load() -> Result<SpiceConfig, ConfigError> {
        MergeService::load()
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<SpiceConfig, ConfigError> {
        MergeService::load_from_file(path)
    }

    /// Explicit file when given, standard sources otherwise.
    pub fn resolve(path: Option<&Path>) -> Result<SpiceConfig, ConfigError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load(),
        }
    }
}
