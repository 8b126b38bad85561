//! Lowest layer of every merge: the serialized built-in defaults.

use crate::config::GeneratorConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// A builder seeded with `GeneratorConfig::default()`, so later layers only
/// need to name the keys they change.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let defaults = Config::try_from(&GeneratorConfig::default())?;
    Ok(Config::builder().add_source(defaults))
}
