//! Build constants generation (`BuildConfig.java`).

use super::output::{
    refresh_output_dir, timestamp_comment, validate_class_name, validate_output_dir,
    validate_package_name,
};
use super::GenerationReport;
use crate::config::{BuildConfigConfig, CustomField};
use crate::diagnostics::{Diagnostics, SkipReason};
use crate::error::ApiError;
use crate::java::{ClassNode, FieldEntry, JavaFile, JavaType, ValueKind};
use crate::naming::is_java_name;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

pub struct BuildConfigGenerator {
    config: BuildConfigConfig,
    protected: Vec<PathBuf>,
}

impl BuildConfigGenerator {
    pub fn new(config: BuildConfigConfig) -> Self {
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

    pub fn validate(&self) -> Result<(), ApiError> {
        validate_package_name(&self.config.package_name)?;
        validate_class_name(&self.config.class_name)?;
        for field in &self.config.fields {
            if !is_java_name(&field.name) {
                return Err(ApiError::ConfigError(format!(
                    "Invalid field name: {}",
                    field.name
                )));
            }
            typed_field(field)?;
        }
        let protected: Vec<&Path> = self.protected.iter().map(PathBuf::as_path).collect();
        validate_output_dir(&self.config.output_dir, &protected)
    }

    /// Assemble the class without writing anything.
    pub fn build(&self) -> Result<(JavaFile, Diagnostics), ApiError> {
        self.validate()?;
        let config = &self.config;
        let mut root = ClassNode::new(&config.class_name);
        let mut diagnostics = Diagnostics::new();

        root.add_field(FieldEntry::string("NAME", &config.app_name));
        root.add_field(FieldEntry::string("GROUP", &config.group_id));
        root.add_field(FieldEntry::string("VERSION", &config.app_version));
        root.add_field(FieldEntry {
            name: "DEBUG".to_string(),
            ty: JavaType::Boolean,
            value: config.debug.to_string(),
            kind: ValueKind::RawLiteral,
        });
        let optional = [
            ("ARTIFACT", &config.artifact_id),
            ("DESC", &config.desc),
            ("EMAIL", &config.email),
            ("URL", &config.url),
        ];
        for (name, value) in optional {
            if let Some(value) = value {
                root.add_field(FieldEntry::string(name, value));
            }
        }

        for field in &config.fields {
            let entry = typed_field(field)?;
            debug!(name = %entry.name, value = %entry.value, "Custom field");
            if !root.add_field(entry) {
                diagnostics.skip(&config.class_name, &field.name, SkipReason::Duplicate);
            }
        }

        let file = JavaFile::new(&config.package_name, root)
            .with_comment(timestamp_comment(chrono::Local::now()));
        Ok((file, diagnostics))
    }

    pub fn generate(&self) -> Result<GenerationReport, ApiError> {
        let started = Instant::now();
        info!(class = %self.config.class_name, "Generating BuildConfig");

        let (file, diagnostics) = self.build()?;
        refresh_output_dir(&self.config.output_dir)?;
        let output_file = file.write_to(&self.config.output_dir)?;

        info!(file = %output_file.display(), "Source generated");
        Ok(GenerationReport {
            class_name: file.root.name.clone(),
            output_file,
            field_count: file.root.total_fields(),
            class_count: file.root.total_classes(),
            skipped: diagnostics.skipped,
            duration_ms: started.elapsed().as_millis(),
        })
    }
}

/// Check a custom value against its type and turn it into a field.
fn typed_field(field: &CustomField) -> Result<FieldEntry, ApiError> {
    let invalid = || {
        ApiError::ConfigError(format!(
            "Invalid {} value for {}: {}",
            field.ty.keyword(),
            field.name,
            field.value
        ))
    };
    let raw = field.value.trim();
    let (value, kind) = match field.ty {
        JavaType::String => (field.value.clone(), ValueKind::StringLiteral),
        JavaType::Char => {
            let mut chars = field.value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if u32::from(c) <= 0xFFFF => {
                    (field.value.clone(), ValueKind::CharLiteral)
                }
                _ => return Err(invalid()),
            }
        }
        JavaType::Boolean => match raw {
            "true" | "false" => (raw.to_string(), ValueKind::RawLiteral),
            _ => return Err(invalid()),
        },
        JavaType::Byte => (
            raw.parse::<i8>().map_err(|_| invalid())?.to_string(),
            ValueKind::RawLiteral,
        ),
        JavaType::Short => (
            raw.parse::<i16>().map_err(|_| invalid())?.to_string(),
            ValueKind::RawLiteral,
        ),
        JavaType::Int => (
            raw.parse::<i32>().map_err(|_| invalid())?.to_string(),
            ValueKind::RawLiteral,
        ),
        JavaType::Long => (
            format!("{}L", raw.parse::<i64>().map_err(|_| invalid())?),
            ValueKind::RawLiteral,
        ),
        JavaType::Float => {
            let parsed = raw.parse::<f32>().map_err(|_| invalid())?;
            if !parsed.is_finite() {
                return Err(invalid());
            }
            (format!("{:?}f", parsed), ValueKind::RawLiteral)
        }
        JavaType::Double => {
            let parsed = raw.parse::<f64>().map_err(|_| invalid())?;
            if !parsed.is_finite() {
                return Err(invalid());
            }
            (format!("{:?}", parsed), ValueKind::RawLiteral)
        }
    };
    Ok(FieldEntry {
        name: field.name.clone(),
        ty: field.ty,
        value,
        kind,
    })
}
