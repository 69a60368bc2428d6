pub mod service;

pub(crate) mod merge_policy {
    //! Defaults every source is layered over.

    use crate::config::{DEFAULT_BASE_URL, DEFAULT_LOCKED_PROFILE, DEFAULT_TIMEOUT_SECS};
    use config::builder::DefaultState;
    use config::{Config, ConfigBuilder, ConfigError};

    pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.base_url", DEFAULT_BASE_URL)?
            .set_default("server.timeout_secs", DEFAULT_TIMEOUT_SECS)?
            .set_default("console.locked_profile", DEFAULT_LOCKED_PROFILE)
    }
}
