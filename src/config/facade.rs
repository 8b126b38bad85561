//! ConfigLoader facade delegating to the merge service.

use super::merge::service::MergeService;
use super::GeneratorConfig;
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a project: defaults, `rgen.toml`, environment.
    pub fn load(project_dir: &Path) -> Result<GeneratorConfig, ConfigError> {
        MergeService::load(project_dir)
    }

    /// Load configuration from a specific file instead of the project file.
    pub fn load_from_file(path: &Path) -> Result<GeneratorConfig, ConfigError> {
        MergeService::load_from_file(path)
    }

    /// Create default configuration.
    pub fn default() -> GeneratorConfig {
        GeneratorConfig::default()
    }
}
