//! Environment variable source: RGEN prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// `RGEN__R__PACKAGE_NAME=com.example` sets `r.package_name`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("RGEN")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
