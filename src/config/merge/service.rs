//! MergeService: orchestrates sources, applies merge policy, deserializes to SpiceConfig.

use crate::config::sources::{environment, file};
use crate::config::SpiceConfig;
use config::ConfigError;
use std::path::Path;

use super::merge_policy;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config from standard sources.
    /// Precedence: defaults (lowest) -> global file -> environment (highest).
    pub fn load() -> Result<SpiceConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = file::add_global(builder)?;
        let builder = environment::add_to_builder(builder)?;

        builder.build()?.try_deserialize()
    }

    /// Load config from a specific file with environment overlay.
    /// The global file is skipped.
    pub fn load_from_file(path: &Path) -> Result<SpiceConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = file::add_explicit(builder, path)?;
        let builder = environment::add_to_builder(builder)?;

        builder.build()?.try_deserialize()
    }
}
