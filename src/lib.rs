//! rgen: Java constants from project resources
//!
//! Walks a resources directory and writes a single Java compilation unit whose
//! nested classes mirror the directory tree and whose `String` fields name the
//! files, CSS selectors, JSON keys and properties keys found in it. A second
//! generator writes a `BuildConfig` class of build metadata constants.

pub mod adapter;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod generate;
pub mod java;
pub mod logging;
pub mod naming;
pub mod tooling;
pub mod tree;

pub use error::ApiError;
pub use generate::{BuildConfigGenerator, GenerationReport, RGenerator};
