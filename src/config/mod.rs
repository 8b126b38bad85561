//! Configuration
//!
//! Layered configuration for both generators: built-in defaults, then
//! `rgen.toml` in the project directory (or an explicit file), then
//! `RGEN__SECTION__KEY` environment variables. CLI flags are applied on top
//! by the caller.

pub mod facade;
pub mod merge;
pub mod sources;

pub use facade::ConfigLoader;

use crate::adapter::{CssOptions, JsonOptions, PropertiesOptions};
use crate::java::JavaType;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File looked up in the project directory.
pub const PROJECT_CONFIG_FILE: &str = "rgen.toml";

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub r: RConfig,

    #[serde(default)]
    pub build_config: BuildConfigConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GeneratorConfig {
    /// Make every relative path absolute against `project_dir`.
    pub fn resolve_paths(&mut self, project_dir: &Path) {
        self.r.resources_dir = resolve_path(project_dir, &self.r.resources_dir);
        self.r.output_dir = resolve_path(project_dir, &self.r.output_dir);
        self.r.exclusions = self
            .r
            .exclusions
            .iter()
            .map(|p| resolve_path(project_dir, p))
            .collect();
        self.build_config.output_dir = resolve_path(project_dir, &self.build_config.output_dir);
        if let Some(file) = &self.logging.file {
            self.logging.file = Some(resolve_path(project_dir, file));
        }
    }
}

pub fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// `[r]`: the resource class generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RConfig {
    /// Package of the generated class; required.
    #[serde(default)]
    pub package_name: String,

    #[serde(default = "default_r_class_name")]
    pub class_name: String,

    #[serde(default = "default_resources_dir")]
    pub resources_dir: PathBuf,

    #[serde(default = "default_r_output_dir")]
    pub output_dir: PathBuf,

    /// Files or directories left out of the walk.
    #[serde(default)]
    pub exclusions: Vec<PathBuf>,

    #[serde(default)]
    pub uppercase_fields: bool,

    #[serde(default)]
    pub lowercase_classes: bool,

    #[serde(default)]
    pub enable_css: bool,

    #[serde(default)]
    pub enable_json: bool,

    #[serde(default)]
    pub enable_properties: bool,

    #[serde(default)]
    pub css: CssOptions,

    #[serde(default)]
    pub json: JsonOptions,

    #[serde(default)]
    pub properties: PropertiesOptions,
}

fn default_r_class_name() -> String {
    "R".to_string()
}

fn default_resources_dir() -> PathBuf {
    PathBuf::from("src/main/resources")
}

fn default_r_output_dir() -> PathBuf {
    PathBuf::from("build/generated/r")
}

impl Default for RConfig {
    fn default() -> Self {
        Self {
            package_name: String::new(),
            class_name: default_r_class_name(),
            resources_dir: default_resources_dir(),
            output_dir: default_r_output_dir(),
            exclusions: Vec::new(),
            uppercase_fields: false,
            lowercase_classes: false,
            enable_css: false,
            enable_json: false,
            enable_properties: false,
            css: CssOptions::default(),
            json: JsonOptions::default(),
            properties: PropertiesOptions::default(),
        }
    }
}

/// `[build_config]`: the build constants generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildConfigConfig {
    #[serde(default)]
    pub package_name: String,

    #[serde(default = "default_build_config_class_name")]
    pub class_name: String,

    #[serde(default = "default_build_config_output_dir")]
    pub output_dir: PathBuf,

    /// Written as `NAME`.
    #[serde(default)]
    pub app_name: String,

    /// Written as `GROUP`.
    #[serde(default)]
    pub group_id: String,

    /// Written as `VERSION`.
    #[serde(default)]
    pub app_version: String,

    /// Written as `DEBUG`.
    #[serde(default)]
    pub debug: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Extra typed constants, written after the standard ones.
    #[serde(default)]
    pub fields: Vec<CustomField>,
}

fn default_build_config_class_name() -> String {
    "BuildConfig".to_string()
}

fn default_build_config_output_dir() -> PathBuf {
    PathBuf::from("build/generated/buildconfig")
}

impl Default for BuildConfigConfig {
    fn default() -> Self {
        Self {
            package_name: String::new(),
            class_name: default_build_config_class_name(),
            output_dir: default_build_config_output_dir(),
            app_name: String::new(),
            group_id: String::new(),
            app_version: String::new(),
            debug: false,
            artifact_id: None,
            desc: None,
            email: None,
            url: None,
            fields: Vec::new(),
        }
    }
}

/// A `[[build_config.fields]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: JavaType,
    pub value: String,
}

impl CustomField {
    /// Parse `TYPE:NAME=VALUE` as given on the command line.
    pub fn parse_arg(arg: &str) -> Option<Self> {
        let (ty, rest) = arg.split_once(':')?;
        let (name, value) = rest.split_once('=')?;
        Some(Self {
            name: name.trim().to_string(),
            ty: JavaType::parse(ty)?,
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.r.class_name, "R");
        assert_eq!(config.r.resources_dir, PathBuf::from("src/main/resources"));
        assert!(!config.r.enable_css);
        assert_eq!(config.build_config.class_name, "BuildConfig");
    }

    #[test]
    fn test_resolve_paths() {
        let mut config = GeneratorConfig::default();
        config.r.exclusions = vec![PathBuf::from("src/main/resources/skip")];
        config.r.output_dir = PathBuf::from("/abs/out");
        config.resolve_paths(Path::new("/project"));
        assert_eq!(
            config.r.resources_dir,
            PathBuf::from("/project/src/main/resources")
        );
        assert_eq!(config.r.output_dir, PathBuf::from("/abs/out"));
        assert_eq!(
            config.r.exclusions[0],
            PathBuf::from("/project/src/main/resources/skip")
        );
    }

    #[test]
    fn test_parse_custom_field_arg() {
        let field = CustomField::parse_arg("int:MAX_USERS=100").unwrap();
        assert_eq!(field.ty, JavaType::Int);
        assert_eq!(field.name, "MAX_USERS");
        assert_eq!(field.value, "100");

        let field = CustomField::parse_arg("string:GREETING=a=b").unwrap();
        assert_eq!(field.value, "a=b");

        assert!(CustomField::parse_arg("widget:X=1").is_none());
        assert!(CustomField::parse_arg("int=1").is_none());
    }

    #[test]
    fn test_toml_section_parsing() {
        let config: GeneratorConfig = toml::from_str(
            r#"
            [r]
            package_name = "com.example"
            enable_json = true

            [r.json]
            recursive = true

            [[build_config.fields]]
            name = "RETRIES"
            type = "int"
            value = "3"
            "#,
        )
        .unwrap();
        assert_eq!(config.r.package_name, "com.example");
        assert!(config.r.json.recursive);
        assert!(config.r.json.write_array);
        assert_eq!(config.build_config.fields[0].ty, JavaType::Int);
    }
}
