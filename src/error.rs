//! Error types for generation runs.
//!
//! Configuration and parse errors are fatal for a run. Naming problems and
//! field collisions are not errors at all; they are reported through
//! [`crate::diagnostics::Diagnostics`].

use std::path::PathBuf;
use thiserror::Error;

/// Resource formats that can fail to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceFormat {
    Css,
    Json,
    Properties,
}

impl std::fmt::Display for ResourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResourceFormat::Css => "CSS",
            ResourceFormat::Json => "JSON",
            ResourceFormat::Properties => "properties",
        };
        f.write_str(name)
    }
}

/// Errors surfaced by the library and the CLI.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Blank or invalid configuration, missing resources directory, bad CLI input.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A resource file of a recognized format could not be parsed.
    #[error("Failed to parse {format} file {}: {message}", .path.display())]
    ParseError {
        path: PathBuf,
        format: ResourceFormat,
        message: String,
    },

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk resources: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ApiError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ApiError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(
        path: impl Into<PathBuf>,
        format: ResourceFormat,
        message: impl Into<String>,
    ) -> Self {
        ApiError::ParseError {
            path: path.into(),
            format,
            message: message.into(),
        }
    }
}
