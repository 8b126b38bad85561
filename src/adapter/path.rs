//! Path adapter: one field per file holding its path below the resources root.

use super::FieldSink;
use crate::tree::ResourceFile;
use std::path::Path;

/// Add the path field for `file`.
///
/// When a format adapter already handled the file, the field name gets a
/// leading `_` so it does not collide with the extracted keys.
pub fn process(file: &ResourceFile, root: &Path, underscore_prefix: bool, sink: &mut FieldSink<'_>) {
    let value = file.relative_path(root);
    if underscore_prefix {
        sink.add(&format!("_{}", file.base_name()), &value);
    } else {
        sink.add(file.base_name(), &value);
    }
}
