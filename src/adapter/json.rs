//! JSON adapter: writes the keys of the top-level object.
//!
//! Nested objects are only visited when they sit inside an array and
//! `recursive` is on. An object that is the direct value of another object's
//! key is not descended into.

use super::FieldSink;
use crate::error::{ApiError, ResourceFormat};
use crate::tree::ResourceFile;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonOptions {
    /// Write keys of objects found inside arrays (default: false).
    #[serde(default)]
    pub recursive: bool,

    /// Traverse array values (default: true).
    #[serde(default = "default_true")]
    pub write_array: bool,
}

fn default_true() -> bool {
    true
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            recursive: false,
            write_array: default_true(),
        }
    }
}

pub(crate) fn process(
    options: &JsonOptions,
    file: &ResourceFile,
    sink: &mut FieldSink<'_>,
) -> Result<(), ApiError> {
    let bytes = file.read_bytes()?;
    let value: Value = serde_json::from_slice(&bytes)
        .map_err(|e| ApiError::parse(&file.path, ResourceFormat::Json, e.to_string()))?;
    let object = value.as_object().ok_or_else(|| {
        ApiError::parse(
            &file.path,
            ResourceFormat::Json,
            "top-level value must be an object",
        )
    })?;
    visit_object(options, object, sink);
    Ok(())
}

fn visit_object(options: &JsonOptions, object: &Map<String, Value>, sink: &mut FieldSink<'_>) {
    for (key, value) in object {
        sink.add_key(key);
        if let Value::Array(items) = value {
            if options.write_array {
                visit_array(options, items, sink);
            }
        }
    }
}

fn visit_array(options: &JsonOptions, items: &[Value], sink: &mut FieldSink<'_>) {
    for item in items {
        match item {
            Value::Object(object) if options.recursive => visit_object(options, object, sink),
            Value::Array(nested) if options.write_array => visit_array(options, nested, sink),
            _ => {}
        }
    }
}
