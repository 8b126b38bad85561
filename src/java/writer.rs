//! Serialization of a [`ClassNode`] tree into a single `.java` compilation unit.

use super::literal::{char_literal, string_literal};
use super::node::{ClassNode, FieldEntry, ValueKind};
use crate::error::ApiError;
use std::fmt::Write;
use std::path::{Path, PathBuf};

const INDENT: &str = "  ";

/// A package declaration, an optional file comment and one root class.
#[derive(Debug, Clone)]
pub struct JavaFile {
    pub package: String,
    pub comment: Option<String>,
    pub root: ClassNode,
}

impl JavaFile {
    pub fn new(package: impl Into<String>, root: ClassNode) -> Self {
        Self {
            package: package.into(),
            comment: None,
            root,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Render the compilation unit as Java source text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(comment) = &self.comment {
            for line in comment.lines() {
                let _ = writeln!(out, "// {}", line);
            }
        }
        if !self.package.is_empty() {
            let _ = writeln!(out, "package {};", self.package);
            out.push('\n');
        }
        emit_class(&mut out, &self.root, 0, true);
        out
    }

    /// Relative location of the file: package directories plus `<Class>.java`.
    pub fn relative_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        for segment in self.package.split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(format!("{}.java", self.root.name));
        path
    }

    /// Write the rendered source below `dir`, creating package directories.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ApiError> {
        let path = dir.join(self.relative_path());
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ApiError::io(parent, e))?;
        }
        std::fs::write(&path, self.render()).map_err(|e| ApiError::io(&path, e))?;
        Ok(path)
    }
}

fn emit_class(out: &mut String, class: &ClassNode, depth: usize, is_root: bool) {
    let indent = INDENT.repeat(depth);
    let member_indent = INDENT.repeat(depth + 1);
    let modifiers = if is_root {
        "public final"
    } else {
        "public static final"
    };
    let _ = writeln!(out, "{}{} class {} {{", indent, modifiers, class.name);

    let _ = writeln!(out, "{}private {}() {{", member_indent, class.name);
    let _ = writeln!(out, "{}}}", member_indent);

    for field in class.fields() {
        out.push('\n');
        let _ = writeln!(out, "{}{}", member_indent, field_declaration(field));
    }

    for nested in class.nested_classes() {
        out.push('\n');
        emit_class(out, nested, depth + 1, false);
    }

    let _ = writeln!(out, "{}}}", indent);
}

fn field_declaration(field: &FieldEntry) -> String {
    let value = match field.kind {
        ValueKind::StringLiteral => string_literal(&field.value),
        ValueKind::CharLiteral => match field.value.chars().next() {
            Some(c) => char_literal(c),
            None => "'\\u0000'".to_string(),
        },
        ValueKind::RawLiteral => field.value.clone(),
    };
    format!(
        "public static final {} {} = {};",
        field.ty.keyword(),
        field.name,
        value
    )
}
