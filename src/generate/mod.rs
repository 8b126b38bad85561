//! Generators: each validates its configuration, builds one compilation unit
//! in memory, then replaces its output directory with the result.

pub mod buildconfig;
pub mod output;
pub mod r;

pub use buildconfig::BuildConfigGenerator;
pub use r::RGenerator;

use crate::diagnostics::SkippedName;
use serde::Serialize;
use std::path::PathBuf;

/// Outcome of one successful generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    /// Root class name as written.
    pub class_name: String,
    pub output_file: PathBuf,
    /// Fields across all classes.
    pub field_count: usize,
    /// Classes including the root.
    pub class_count: usize,
    pub skipped: Vec<SkippedName>,
    pub duration_ms: u128,
}
