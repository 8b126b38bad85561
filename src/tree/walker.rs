//! Recursive walk of the resources tree into a class tree.
//!
//! Each subdirectory becomes a nested class; each file goes through the
//! format adapters and then the path adapter.

use crate::adapter::{path, AdapterContext, FieldSink};
use crate::diagnostics::SkipReason;
use crate::error::ApiError;
use crate::naming::to_java_name;
use crate::tree::node::{ResourceDirectory, ResourceNode};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Paths left out of the walk.
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    exclusions: HashSet<PathBuf>,
}

impl WalkOptions {
    /// Build options from absolute exclusion paths.
    ///
    /// Paths are canonicalized so `a/../b` and symlinked spellings still match.
    /// Paths that do not exist are kept as given; they can never match.
    pub fn new<I, P>(exclusions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let exclusions = exclusions
            .into_iter()
            .map(|p| canonical(p.as_ref()))
            .collect();
        Self { exclusions }
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        self.exclusions.contains(path)
    }

    pub fn exclusion_count(&self) -> usize {
        self.exclusions.len()
    }
}

fn canonical(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Walk `root` into the class behind `sink`.
///
/// Path field values are relative to `root`.
pub fn walk(
    sink: &mut FieldSink<'_>,
    root: &Path,
    context: &AdapterContext,
    options: &WalkOptions,
) -> Result<(), ApiError> {
    let root = dunce::canonicalize(root).map_err(|e| ApiError::io(root, e))?;
    walk_directory(sink, &ResourceDirectory::new(&root), &root, context, options)
}

fn walk_directory(
    sink: &mut FieldSink<'_>,
    directory: &ResourceDirectory,
    root: &Path,
    context: &AdapterContext,
    options: &WalkOptions,
) -> Result<(), ApiError> {
    for child in directory.children()? {
        if child.is_hidden() {
            tracing::trace!(path = %child.path().display(), "Skipping hidden entry");
            continue;
        }
        if options.is_excluded(child.path()) {
            tracing::debug!(path = %child.path().display(), "Skipping excluded entry");
            continue;
        }

        match child {
            ResourceNode::Directory(dir) => {
                let candidate = if context.lowercase_classes {
                    dir.name.to_lowercase()
                } else {
                    dir.name.clone()
                };
                let Some(class_name) = to_java_name(&candidate) else {
                    sink.skip(&dir.name, SkipReason::Unsanitizable);
                    continue;
                };
                if sink.has_nested(&class_name) {
                    sink.skip(&dir.name, SkipReason::MergedClass);
                }
                let mut nested = sink.nested(&class_name);
                walk_directory(&mut nested, &dir, root, context, options)?;
            }
            ResourceNode::LinkedDirectory(dir) => {
                sink.skip(&dir.name, SkipReason::LinkedDirectory);
            }
            ResourceNode::File(file) => {
                let handled = context.process_formats(&file, sink)?;
                path::process(&file, root, handled, sink);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{FormatAdapter, JsonOptions, PropertiesOptions};
    use crate::diagnostics::Diagnostics;
    use crate::java::ClassNode;
    use std::fs;

    fn context() -> AdapterContext {
        AdapterContext {
            adapters: vec![
                FormatAdapter::Json(JsonOptions::default()),
                FormatAdapter::Properties(PropertiesOptions::default()),
            ],
            ..Default::default()
        }
    }

    fn run(
        root: &Path,
        context: &AdapterContext,
        options: &WalkOptions,
    ) -> Result<(ClassNode, Diagnostics), ApiError> {
        let mut class = ClassNode::new("R");
        let mut diagnostics = Diagnostics::new();
        {
            let mut sink = FieldSink::new(&mut class, "R", false, &mut diagnostics);
            walk(&mut sink, root, context, options)?;
        }
        Ok((class, diagnostics))
    }

    #[test]
    fn test_directories_become_nested_classes() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp.path().join("images/icons")).unwrap();
        fs::write(temp.path().join("images/icons/add.png"), "").unwrap();
        fs::write(temp.path().join("top.txt"), "").unwrap();

        let (class, _) = run(temp.path(), &context(), &WalkOptions::default()).unwrap();
        assert_eq!(class.field("top").unwrap().value, "/top.txt");
        let icons = class.nested("images").unwrap().nested("icons").unwrap();
        assert_eq!(icons.field("add").unwrap().value, "/images/icons/add.png");
    }

    #[test]
    fn test_empty_directory_keeps_its_class() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir(temp.path().join("empty")).unwrap();
        let (class, _) = run(temp.path(), &context(), &WalkOptions::default()).unwrap();
        assert!(class.nested("empty").unwrap().is_empty());
    }

    #[test]
    fn test_hidden_entries_skipped() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();
        fs::write(temp.path().join(".git/config"), "").unwrap();
        fs::write(temp.path().join(".DS_Store"), "").unwrap();

        let (class, _) = run(temp.path(), &context(), &WalkOptions::default()).unwrap();
        assert!(class.is_empty());
    }

    #[test]
    fn test_unsanitizable_directory_is_omitted() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir(temp.path().join("_")).unwrap();
        fs::write(temp.path().join("_/inside.txt"), "").unwrap();

        let (class, diagnostics) = run(temp.path(), &context(), &WalkOptions::default()).unwrap();
        assert!(class.is_empty());
        assert_eq!(diagnostics.count(SkipReason::Unsanitizable), 1);
    }

    #[test]
    fn test_excluded_directory_not_recursed() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir(temp.path().join("skip")).unwrap();
        fs::write(temp.path().join("skip/a.txt"), "").unwrap();
        fs::write(temp.path().join("keep.txt"), "").unwrap();

        let options = WalkOptions::new([temp.path().join("skip")]);
        let (class, _) = run(temp.path(), &context(), &options).unwrap();
        assert!(!class.has_nested("skip"));
        assert!(class.has_field("keep"));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_files_walked_and_linked_directories_reported() {
        let temp = tempfile::tempdir().unwrap();
        let res = temp.path().join("res");
        fs::create_dir_all(res.join("images")).unwrap();
        fs::write(temp.path().join("shared.png"), "").unwrap();
        fs::write(res.join("plain.png"), "").unwrap();
        std::os::unix::fs::symlink("../shared.png", res.join("logo.png")).unwrap();
        std::os::unix::fs::symlink(".", res.join("images/loop")).unwrap();

        let (class, diagnostics) = run(&res, &context(), &WalkOptions::default()).unwrap();
        assert_eq!(class.field("logo").unwrap().value, "/logo.png");
        assert_eq!(class.field("plain").unwrap().value, "/plain.png");
        assert!(class.nested("images").unwrap().is_empty());
        assert_eq!(diagnostics.count(SkipReason::LinkedDirectory), 1);
        assert_eq!(diagnostics.skipped[0].name, "loop");
    }

    #[test]
    fn test_colliding_directories_merge() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir(temp.path().join("a-b")).unwrap();
        fs::create_dir(temp.path().join("a_b")).unwrap();
        fs::write(temp.path().join("a-b/one.txt"), "").unwrap();
        fs::write(temp.path().join("a_b/two.txt"), "").unwrap();

        let (class, diagnostics) = run(temp.path(), &context(), &WalkOptions::default()).unwrap();
        let merged = class.nested("a_b").unwrap();
        assert!(merged.has_field("one"));
        assert!(merged.has_field("two"));
        assert_eq!(diagnostics.count(SkipReason::MergedClass), 1);
    }

    #[test]
    fn test_handled_file_gets_prefixed_path_field() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("app.json"), r#"{"title": "x"}"#).unwrap();

        let (class, _) = run(temp.path(), &context(), &WalkOptions::default()).unwrap();
        assert!(class.has_field("title"));
        assert_eq!(class.field("_app").unwrap().value, "/app.json");
        assert!(!class.has_field("app"));
    }

    #[test]
    fn test_parse_error_aborts_walk() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("broken.json"), "{").unwrap();
        let result = run(temp.path(), &context(), &WalkOptions::default());
        assert!(matches!(result, Err(ApiError::ParseError { .. })));
    }
}
