//! Integration tests for the rgen generators and CLI

mod buildconfig_generation;
mod cli_contracts;
mod r_generation;

use std::fs;
use std::path::Path;

/// Write `contents` at `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// Generated source without its timestamp line.
pub fn without_header(source: &str) -> String {
    source
        .lines()
        .skip_while(|line| line.starts_with("// Generated at"))
        .collect::<Vec<_>>()
        .join("\n")
}
