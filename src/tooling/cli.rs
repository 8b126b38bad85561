//! CLI Tooling
//!
//! Command-line interface for the generators. Every command loads the layered
//! project configuration, applies its own flags on top, and returns the text
//! to print.

use crate::config::{resolve_path, ConfigLoader, CustomField, GeneratorConfig};
use crate::error::ApiError;
use crate::generate::{BuildConfigGenerator, RGenerator};
use crate::logging::LoggingConfig;
use crate::naming::to_java_name;
use crate::tooling::format::{format_report_json, format_report_text, format_sanitized_text};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

/// rgen - Java constants generator for resources and build metadata
#[derive(Parser)]
#[command(name = "rgen")]
#[command(about = "Generate Java R and BuildConfig classes from project resources")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Project directory; relative paths in the configuration resolve against it
    #[arg(long, default_value = ".", global = true)]
    pub project_dir: PathBuf,

    /// Configuration file path (replaces <project-dir>/rgen.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Apply the global logging flags on top of the configured section.
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut config = base.clone();
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.file = Some(file.clone());
        }
        config
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the R class from the resources directory
    R {
        /// Package of the generated class
        #[arg(long = "package")]
        package_name: Option<String>,
        /// Generated class name (default: R)
        #[arg(long)]
        class_name: Option<String>,
        /// Resources directory to walk
        #[arg(long)]
        resources_dir: Option<PathBuf>,
        /// Output directory (deleted and recreated on every run)
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// File or directory to leave out; repeatable
        #[arg(long = "exclude")]
        exclusions: Vec<PathBuf>,
        /// Uppercase all field names
        #[arg(long)]
        uppercase_fields: bool,
        /// Lowercase all class names
        #[arg(long)]
        lowercase_classes: bool,
        /// Extract selectors from .css files
        #[arg(long)]
        css: bool,
        /// Extract keys from .json files
        #[arg(long)]
        json: bool,
        /// Extract keys from .properties files
        #[arg(long)]
        properties: bool,
        /// Also write element type selectors (CSS)
        #[arg(long)]
        css_element_selectors: bool,
        /// Charset used to decode stylesheets
        #[arg(long)]
        css_charset: Option<String>,
        /// Visit objects inside arrays (JSON)
        #[arg(long)]
        json_recursive: bool,
        /// Group locale-suffixed files into nested classes (properties)
        #[arg(long)]
        resource_bundle: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Generate the BuildConfig class
    BuildConfig {
        /// Package of the generated class
        #[arg(long = "package")]
        package_name: Option<String>,
        /// Generated class name (default: BuildConfig)
        #[arg(long)]
        class_name: Option<String>,
        /// Output directory (deleted and recreated on every run)
        #[arg(long)]
        output_dir: Option<PathBuf>,
        #[arg(long)]
        app_name: Option<String>,
        #[arg(long)]
        group_id: Option<String>,
        #[arg(long)]
        app_version: Option<String>,
        /// Set DEBUG to true
        #[arg(long)]
        debug: bool,
        #[arg(long)]
        artifact_id: Option<String>,
        #[arg(long)]
        desc: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        url: Option<String>,
        /// Custom field as TYPE:NAME=VALUE; repeatable
        #[arg(long = "field")]
        fields: Vec<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the identifier each name sanitizes to
    Sanitize {
        /// Names to sanitize
        #[arg(required = true)]
        names: Vec<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the resolved configuration
    Config {
        /// Output format (toml or json)
        #[arg(long, default_value = "toml")]
        format: String,
    },
}

/// CLI context holding the resolved project configuration
pub struct CliContext {
    project_dir: PathBuf,
    config: GeneratorConfig,
}

impl CliContext {
    /// Create a new CLI context
    pub fn new(project_dir: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let project_dir = dunce::canonicalize(&project_dir).map_err(|e| {
            ApiError::ConfigError(format!(
                "Project directory not found: {} ({})",
                project_dir.display(),
                e
            ))
        })?;
        let mut config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(&resolve_path(&project_dir, path))?,
            None => ConfigLoader::load(&project_dir)?,
        };
        config.resolve_paths(&project_dir);
        Ok(Self {
            project_dir,
            config,
        })
    }

    pub fn project_dir(&self) -> &PathBuf {
        &self.project_dir
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::R {
                package_name,
                class_name,
                resources_dir,
                output_dir,
                exclusions,
                uppercase_fields,
                lowercase_classes,
                css,
                json,
                properties,
                css_element_selectors,
                css_charset,
                json_recursive,
                resource_bundle,
                format,
            } => {
                let mut config = self.config.r.clone();
                if let Some(name) = package_name {
                    config.package_name = name.clone();
                }
                if let Some(name) = class_name {
                    config.class_name = name.clone();
                }
                if let Some(dir) = resources_dir {
                    config.resources_dir = resolve_path(&self.project_dir, dir);
                }
                if let Some(dir) = output_dir {
                    config.output_dir = resolve_path(&self.project_dir, dir);
                }
                config.exclusions.extend(
                    exclusions
                        .iter()
                        .map(|p| resolve_path(&self.project_dir, p)),
                );
                config.uppercase_fields |= *uppercase_fields;
                config.lowercase_classes |= *lowercase_classes;
                config.enable_css |= *css;
                config.enable_json |= *json;
                config.enable_properties |= *properties;
                config.css.write_element_type_selector |= *css_element_selectors;
                if let Some(charset) = css_charset {
                    config.css.charset = charset.clone();
                }
                config.json.recursive |= *json_recursive;
                config.properties.write_resource_bundle |= *resource_bundle;

                let report = RGenerator::new(config)
                    .protect_dir(&self.project_dir)
                    .generate()?;
                match format.as_str() {
                    "json" => format_report_json(&report),
                    _ => Ok(format_report_text("R generated", &report)),
                }
            }
            Commands::BuildConfig {
                package_name,
                class_name,
                output_dir,
                app_name,
                group_id,
                app_version,
                debug,
                artifact_id,
                desc,
                email,
                url,
                fields,
                format,
            } => {
                let mut config = self.config.build_config.clone();
                let overrides = [
                    (&mut config.package_name, package_name),
                    (&mut config.class_name, class_name),
                    (&mut config.app_name, app_name),
                    (&mut config.group_id, group_id),
                    (&mut config.app_version, app_version),
                ];
                for (target, value) in overrides {
                    if let Some(value) = value {
                        *target = value.clone();
                    }
                }
                let optional = [
                    (&mut config.artifact_id, artifact_id),
                    (&mut config.desc, desc),
                    (&mut config.email, email),
                    (&mut config.url, url),
                ];
                for (target, value) in optional {
                    if value.is_some() {
                        *target = value.clone();
                    }
                }
                if let Some(dir) = output_dir {
                    config.output_dir = resolve_path(&self.project_dir, dir);
                }
                config.debug |= *debug;
                for arg in fields {
                    let field = CustomField::parse_arg(arg).ok_or_else(|| {
                        ApiError::ConfigError(format!(
                            "Invalid field '{}' (expected TYPE:NAME=VALUE)",
                            arg
                        ))
                    })?;
                    config.fields.push(field);
                }

                let report = BuildConfigGenerator::new(config)
                    .protect_dir(&self.project_dir)
                    .generate()?;
                match format.as_str() {
                    "json" => format_report_json(&report),
                    _ => Ok(format_report_text("BuildConfig generated", &report)),
                }
            }
            Commands::Sanitize { names, format } => {
                let results: Vec<(String, Option<String>)> = names
                    .iter()
                    .map(|name| (name.clone(), to_java_name(name)))
                    .collect();
                info!(count = results.len(), "Sanitized names");
                match format.as_str() {
                    "json" => {
                        let items: Vec<_> = results
                            .iter()
                            .map(|(input, output)| json!({ "input": input, "output": output }))
                            .collect();
                        serde_json::to_string_pretty(&items)
                            .map_err(|e| ApiError::Serialization(e.to_string()))
                    }
                    _ => Ok(format_sanitized_text(&results)),
                }
            }
            Commands::Config { format } => match format.as_str() {
                "json" => serde_json::to_string_pretty(&self.config)
                    .map_err(|e| ApiError::Serialization(e.to_string())),
                "toml" => toml::to_string_pretty(&self.config)
                    .map_err(|e| ApiError::Serialization(e.to_string())),
                other => Err(ApiError::ConfigError(format!(
                    "Invalid config format: {} (must be 'toml' or 'json')",
                    other
                ))),
            },
        }
    }
}
