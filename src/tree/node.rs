//! Filesystem node types for the resources tree.

use crate::error::ApiError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A regular file below the resources root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFile {
    pub path: PathBuf,
    pub name: String,
}

/// A directory below (or at) the resources root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDirectory {
    pub path: PathBuf,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceNode {
    File(ResourceFile),
    Directory(ResourceDirectory),
    /// A symlink to a directory. It is reported, never descended into.
    LinkedDirectory(ResourceDirectory),
}

impl ResourceNode {
    pub fn name(&self) -> &str {
        match self {
            ResourceNode::File(f) => &f.name,
            ResourceNode::Directory(d) | ResourceNode::LinkedDirectory(d) => &d.name,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ResourceNode::File(f) => &f.path,
            ResourceNode::Directory(d) | ResourceNode::LinkedDirectory(d) => &d.path,
        }
    }

    /// Dot-files and dot-directories are hidden.
    pub fn is_hidden(&self) -> bool {
        self.name().starts_with('.')
    }
}

impl ResourceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = file_name_of(&path);
        Self { path, name }
    }

    /// Extension after the last `.`, empty when there is none.
    pub fn extension(&self) -> &str {
        match self.name.rfind('.') {
            Some(i) => &self.name[i + 1..],
            None => "",
        }
    }

    /// File name without its extension.
    pub fn base_name(&self) -> &str {
        match self.name.rfind('.') {
            Some(i) => &self.name[..i],
            None => &self.name,
        }
    }

    pub fn read_bytes(&self) -> Result<Vec<u8>, ApiError> {
        std::fs::read(&self.path).map_err(|e| ApiError::io(&self.path, e))
    }

    /// Path below `root`, `/`-separated with a leading `/` (e.g. `/style/some.css`).
    pub fn relative_path(&self, root: &Path) -> String {
        let relative = self.path.strip_prefix(root).unwrap_or(&self.path);
        let mut out = String::new();
        for component in relative.components() {
            if let std::path::Component::Normal(segment) = component {
                out.push('/');
                out.push_str(&segment.to_string_lossy());
            }
        }
        out
    }
}

impl ResourceDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = file_name_of(&path);
        Self { path, name }
    }

    /// Direct children sorted by file name.
    ///
    /// A symlink to a file is returned as a file under the link's own name.
    /// A symlink to a directory comes back as [`ResourceNode::LinkedDirectory`]
    /// so a link cycle cannot recurse forever. Dangling links are skipped.
    pub fn children(&self) -> Result<Vec<ResourceNode>, ApiError> {
        let mut children = Vec::new();
        for entry in WalkDir::new(&self.path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = entry?;
            let file_type = entry.file_type();
            if file_type.is_dir() {
                children.push(ResourceNode::Directory(ResourceDirectory::new(entry.into_path())));
            } else if file_type.is_file() {
                children.push(ResourceNode::File(ResourceFile::new(entry.into_path())));
            } else if file_type.is_symlink() {
                match std::fs::metadata(entry.path()) {
                    Ok(target) if target.is_file() => {
                        children.push(ResourceNode::File(ResourceFile::new(entry.into_path())));
                    }
                    Ok(target) if target.is_dir() => {
                        children.push(ResourceNode::LinkedDirectory(ResourceDirectory::new(
                            entry.into_path(),
                        )));
                    }
                    Ok(_) => {
                        tracing::debug!(path = %entry.path().display(), "Skipping link to non-regular entry");
                    }
                    Err(e) => {
                        tracing::warn!(path = %entry.path().display(), error = %e, "Skipping dangling link");
                    }
                }
            } else {
                tracing::debug!(path = %entry.path().display(), "Skipping non-regular entry");
            }
        }
        Ok(children)
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
