//! Class and field nodes of a generated compilation unit.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Declared type of a generated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JavaType {
    String,
    Char,
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl JavaType {
    /// Type name as written in a field declaration.
    pub fn keyword(&self) -> &'static str {
        match self {
            JavaType::String => "String",
            JavaType::Char => "char",
            JavaType::Boolean => "boolean",
            JavaType::Byte => "byte",
            JavaType::Short => "short",
            JavaType::Int => "int",
            JavaType::Long => "long",
            JavaType::Float => "float",
            JavaType::Double => "double",
        }
    }

    /// Parse a type name as accepted on the command line (`string`, `int`, ...).
    pub fn parse(s: &str) -> Option<Self> {
        let ty = match s.trim().to_ascii_lowercase().as_str() {
            "string" => JavaType::String,
            "char" | "character" => JavaType::Char,
            "boolean" | "bool" => JavaType::Boolean,
            "byte" => JavaType::Byte,
            "short" => JavaType::Short,
            "int" | "integer" => JavaType::Int,
            "long" => JavaType::Long,
            "float" => JavaType::Float,
            "double" => JavaType::Double,
            _ => return None,
        };
        Some(ty)
    }
}

/// How a field value is rendered in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Double-quoted with Java string escaping.
    StringLiteral,
    /// Single-quoted with Java character escaping.
    CharLiteral,
    /// Emitted verbatim (numbers, booleans).
    RawLiteral,
}

/// A single `public static final` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    pub name: String,
    pub ty: JavaType,
    pub value: String,
    pub kind: ValueKind,
}

impl FieldEntry {
    /// A `String` field whose value is a string literal.
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: JavaType::String,
            value: value.into(),
            kind: ValueKind::StringLiteral,
        }
    }
}

/// A class scope: fields and nested classes in insertion order.
///
/// Field names and nested class names are unique within one node. Adding a
/// field under an existing name is a no-op (first writer wins).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNode {
    pub name: String,
    fields: IndexMap<String, FieldEntry>,
    nested: IndexMap<String, ClassNode>,
}

impl ClassNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
            nested: IndexMap::new(),
        }
    }

    /// Add a field, returning `false` if a field with that name already exists.
    pub fn add_field(&mut self, entry: FieldEntry) -> bool {
        if self.fields.contains_key(&entry.name) {
            return false;
        }
        self.fields.insert(entry.name.clone(), entry);
        true
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldEntry> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldEntry> {
        self.fields.values()
    }

    pub fn has_nested(&self, name: &str) -> bool {
        self.nested.contains_key(name)
    }

    pub fn nested(&self, name: &str) -> Option<&ClassNode> {
        self.nested.get(name)
    }

    /// Get the nested class called `name`, creating it at the end if absent.
    pub fn nested_mut_or_insert(&mut self, name: &str) -> &mut ClassNode {
        self.nested
            .entry(name.to_string())
            .or_insert_with(|| ClassNode::new(name))
    }

    pub fn nested_classes(&self) -> impl Iterator<Item = &ClassNode> {
        self.nested.values()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.nested.is_empty()
    }

    /// Number of fields in this class and all nested classes.
    pub fn total_fields(&self) -> usize {
        self.fields.len()
            + self
                .nested
                .values()
                .map(ClassNode::total_fields)
                .sum::<usize>()
    }

    /// Number of classes including this one.
    pub fn total_classes(&self) -> usize {
        1 + self
            .nested
            .values()
            .map(ClassNode::total_classes)
            .sum::<usize>()
    }
}
