//! Resource class generation.
//!
//! The whole class tree is built in memory before the output directory is
//! touched, so a configuration or parse error leaves the previous output in
//! place.

use super::output::{
    is_within, refresh_output_dir, timestamp_comment, validate_class_name, validate_output_dir,
    validate_package_name,
};
use super::GenerationReport;
use crate::adapter::{AdapterContext, FieldSink, FormatAdapter};
use crate::config::RConfig;
use crate::diagnostics::Diagnostics;
use crate::error::ApiError;
use crate::java::{ClassNode, JavaFile};
use crate::tree::{walk, WalkOptions};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Generator for the `R` class of one resources directory.
pub struct RGenerator {
    config: RConfig,
    protected: Vec<PathBuf>,
}

impl RGenerator {
    pub fn new(config: RConfig) -> Self {
        Self {
            config,
            protected: Vec::new(),
        }
    }

    /// Refuse to run when refreshing the output directory would delete `dir`.
    pub fn protect_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.protected.push(dir.into());
        self
    }

    pub fn config(&self) -> &RConfig {
        &self.config
    }

    /// Class name as written, after the lowercase-class toggle.
    pub fn effective_class_name(&self) -> String {
        if self.config.lowercase_classes {
            self.config.class_name.to_lowercase()
        } else {
            self.config.class_name.clone()
        }
    }

    /// Check everything that must hold before any file is read or written.
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_package_name(&self.config.package_name)?;
        if self.config.class_name.trim().is_empty() {
            return Err(ApiError::ConfigError("Class name cannot be empty.".to_string()));
        }
        validate_class_name(&self.effective_class_name())?;
        if !self.config.resources_dir.is_dir() {
            return Err(ApiError::ConfigError(format!(
                "Resources folder not found: {}",
                self.config.resources_dir.display()
            )));
        }
        let output_dir = &self.config.output_dir;
        if is_within(output_dir, &self.config.resources_dir) {
            return Err(ApiError::ConfigError(format!(
                "Output directory {} is inside the resources folder",
                output_dir.display()
            )));
        }
        let mut protected: Vec<&Path> = vec![self.config.resources_dir.as_path()];
        protected.extend(self.protected.iter().map(PathBuf::as_path));
        validate_output_dir(output_dir, &protected)
    }

    /// Active format adapters in dispatch order.
    pub fn adapter_context(&self) -> AdapterContext {
        let mut adapters = Vec::new();
        if self.config.enable_css {
            adapters.push(FormatAdapter::Css(self.config.css.clone()));
        }
        if self.config.enable_json {
            adapters.push(FormatAdapter::Json(self.config.json.clone()));
        }
        if self.config.enable_properties {
            adapters.push(FormatAdapter::Properties(self.config.properties.clone()));
        }
        AdapterContext {
            adapters,
            uppercase_fields: self.config.uppercase_fields,
            lowercase_classes: self.config.lowercase_classes,
        }
    }

    /// Walk the resources directory into a class tree without writing anything.
    pub fn build(&self) -> Result<(JavaFile, Diagnostics), ApiError> {
        self.validate()?;
        let context = self.adapter_context();
        let options = WalkOptions::new(&self.config.exclusions);
        let class_name = self.effective_class_name();

        let mut root = ClassNode::new(&class_name);
        let mut diagnostics = Diagnostics::new();
        {
            let mut sink = FieldSink::new(
                &mut root,
                class_name.as_str(),
                context.uppercase_fields,
                &mut diagnostics,
            );
            walk(&mut sink, &self.config.resources_dir, &context, &options)?;
        }

        let file = JavaFile::new(&self.config.package_name, root)
            .with_comment(timestamp_comment(chrono::Local::now()));
        Ok((file, diagnostics))
    }

    /// Build the class and replace the output directory with it.
    pub fn generate(&self) -> Result<GenerationReport, ApiError> {
        let started = Instant::now();
        info!(
            resources = %self.config.resources_dir.display(),
            formats = self.adapter_context().adapters.len(),
            exclusions = self.config.exclusions.len(),
            "Generating R"
        );

        let (file, diagnostics) = self.build()?;
        refresh_output_dir(&self.config.output_dir)?;
        let output_file = file.write_to(&self.config.output_dir)?;

        let report = GenerationReport {
            class_name: file.root.name.clone(),
            output_file,
            field_count: file.root.total_fields(),
            class_count: file.root.total_classes(),
            skipped: diagnostics.skipped,
            duration_ms: started.elapsed().as_millis(),
        };
        info!(
            file = %report.output_file.display(),
            fields = report.field_count,
            classes = report.class_count,
            skipped = report.skipped.len(),
            "Source generated"
        );
        Ok(report)
    }
}
