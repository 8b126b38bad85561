//! Format adapters: turn one resource file into candidate fields.
//!
//! The format adapters form a closed set ([`FormatAdapter`]) tried in a fixed
//! order (CSS, JSON, properties) until one recognizes the file by extension.
//! The path adapter then always runs; whether a format adapter handled the
//! file is passed to it explicitly so it can prefix its field with `_`.

pub mod css;
pub mod json;
pub mod path;
pub mod properties;

pub use css::{CssOptions, CssVersion};
pub use json::JsonOptions;
pub use properties::PropertiesOptions;

use crate::diagnostics::{Diagnostics, SkipReason};
use crate::error::{ApiError, ResourceFormat};
use crate::java::{ClassNode, FieldEntry};
use crate::naming::to_java_name;
use crate::tree::ResourceFile;

/// A format-specific extractor with its options.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatAdapter {
    Css(CssOptions),
    Json(JsonOptions),
    Properties(PropertiesOptions),
}

impl FormatAdapter {
    pub fn format(&self) -> ResourceFormat {
        match self {
            FormatAdapter::Css(_) => ResourceFormat::Css,
            FormatAdapter::Json(_) => ResourceFormat::Json,
            FormatAdapter::Properties(_) => ResourceFormat::Properties,
        }
    }

    /// File extension this adapter recognizes.
    pub fn extension(&self) -> &'static str {
        match self {
            FormatAdapter::Css(_) => "css",
            FormatAdapter::Json(_) => "json",
            FormatAdapter::Properties(_) => "properties",
        }
    }

    /// Extract fields from `file` into `sink`.
    ///
    /// Returns `Ok(false)` when the extension does not belong to this adapter,
    /// `Ok(true)` when the file was handled, even if it produced no fields.
    pub fn process(
        &self,
        file: &ResourceFile,
        sink: &mut FieldSink<'_>,
        lowercase_classes: bool,
    ) -> Result<bool, ApiError> {
        if file.extension() != self.extension() {
            return Ok(false);
        }
        tracing::debug!(file = %file.name, format = %self.format(), "File recognized");
        match self {
            FormatAdapter::Css(options) => css::process(options, file, sink)?,
            FormatAdapter::Json(options) => json::process(options, file, sink)?,
            FormatAdapter::Properties(options) => {
                properties::process(options, file, sink, lowercase_classes)?
            }
        }
        Ok(true)
    }
}

/// Per-run adapter configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdapterContext {
    /// Active format adapters in dispatch order.
    pub adapters: Vec<FormatAdapter>,
    pub uppercase_fields: bool,
    pub lowercase_classes: bool,
}

impl AdapterContext {
    /// Try each format adapter in order; returns whether one handled the file.
    pub fn process_formats(
        &self,
        file: &ResourceFile,
        sink: &mut FieldSink<'_>,
    ) -> Result<bool, ApiError> {
        for adapter in &self.adapters {
            if adapter.process(file, sink, self.lowercase_classes)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Writes sanitized, deduplicated `String` fields into one class scope.
pub struct FieldSink<'a> {
    class: &'a mut ClassNode,
    scope: String,
    uppercase_fields: bool,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> FieldSink<'a> {
    pub fn new(
        class: &'a mut ClassNode,
        scope: impl Into<String>,
        uppercase_fields: bool,
        diagnostics: &'a mut Diagnostics,
    ) -> Self {
        Self {
            class,
            scope: scope.into(),
            uppercase_fields,
            diagnostics,
        }
    }

    /// Add a field whose value is its own raw name.
    pub fn add_key(&mut self, key: &str) {
        self.add(key, key);
    }

    /// Add a field named after `name` holding `value`.
    ///
    /// The name is uppercased when configured, then sanitized. Names that
    /// cannot be sanitized or that already exist in this class are dropped.
    pub fn add(&mut self, name: &str, value: &str) {
        let candidate = if self.uppercase_fields {
            name.to_uppercase()
        } else {
            name.to_string()
        };
        let field_name = match to_java_name(&candidate) {
            Some(field_name) => field_name,
            None => {
                self.diagnostics
                    .skip(&self.scope, name, SkipReason::Unsanitizable);
                return;
            }
        };
        if !self.class.add_field(FieldEntry::string(field_name.clone(), value)) {
            self.diagnostics
                .skip(&self.scope, &field_name, SkipReason::Duplicate);
        }
    }

    pub fn skip(&mut self, name: &str, reason: SkipReason) {
        self.diagnostics.skip(&self.scope, name, reason);
    }

    pub fn has_nested(&self, name: &str) -> bool {
        self.class.has_nested(name)
    }

    /// A sink for the nested class `name`, created if it does not exist yet.
    pub fn nested(&mut self, name: &str) -> FieldSink<'_> {
        let scope = format!("{}.{}", self.scope, name);
        FieldSink {
            class: self.class.nested_mut_or_insert(name),
            scope,
            uppercase_fields: self.uppercase_fields,
            diagnostics: &mut *self.diagnostics,
        }
    }
}
