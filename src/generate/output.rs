//! Helpers shared by the generators: validation, output refresh, header comment.

use crate::error::ApiError;
use crate::naming::{is_java_name, is_package_name};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// Header comment written as the first line of every generated file.
pub fn timestamp_comment(now: DateTime<Local>) -> String {
    format!("Generated at {}", now.format("%m-%d-%Y at %-I.%M.%S %p"))
}

/// Reject a blank or malformed package name.
pub fn validate_package_name(package_name: &str) -> Result<(), ApiError> {
    if package_name.trim().is_empty() {
        return Err(ApiError::ConfigError(
            "Package name cannot be empty.".to_string(),
        ));
    }
    if !is_package_name(package_name) {
        return Err(ApiError::ConfigError(format!(
            "Invalid package name: {}",
            package_name
        )));
    }
    Ok(())
}

/// Reject a blank class name or one that is not a Java identifier.
pub fn validate_class_name(class_name: &str) -> Result<(), ApiError> {
    if class_name.trim().is_empty() {
        return Err(ApiError::ConfigError("Class name cannot be empty.".to_string()));
    }
    if !is_java_name(class_name) {
        return Err(ApiError::ConfigError(format!(
            "Invalid class name: {}",
            class_name
        )));
    }
    Ok(())
}

/// Reject an output directory whose refresh would delete one of `protected`.
///
/// The output directory is removed wholesale on every run, so it may not be
/// any protected directory or one of its ancestors.
pub fn validate_output_dir(output_dir: &Path, protected: &[&Path]) -> Result<(), ApiError> {
    let output = resolved(output_dir);
    for dir in protected {
        let dir = resolved(dir);
        if dir.starts_with(&output) {
            return Err(ApiError::ConfigError(format!(
                "Output directory {} would delete {}",
                output_dir.display(),
                dir.display()
            )));
        }
    }
    Ok(())
}

/// Whether `path` is `dir` or lies below it, after resolving symlinks.
pub fn is_within(path: &Path, dir: &Path) -> bool {
    resolved(path).starts_with(resolved(dir))
}

/// Canonicalize the deepest existing ancestor of `path` and re-append the rest.
fn resolved(path: &Path) -> PathBuf {
    let mut existing = path;
    let mut rest = Vec::new();
    loop {
        if let Ok(mut canonical) = dunce::canonicalize(existing) {
            for name in rest.iter().rev() {
                canonical.push(name);
            }
            return canonical;
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                rest.push(name.to_os_string());
                existing = parent;
            }
            _ => return path.to_path_buf(),
        }
    }
}

/// Delete `dir` if present and recreate it empty.
pub fn refresh_output_dir(dir: &Path) -> Result<(), ApiError> {
    if dir.exists() {
        std::fs::remove_dir_all(dir).map_err(|e| ApiError::io(dir, e))?;
        tracing::info!(dir = %dir.display(), "Existing output deleted");
    }
    std::fs::create_dir_all(dir).map_err(|e| ApiError::io(dir, e))
}
