//! Properties adapter: writes the keys of `.properties` files.
//!
//! With `write_resource_bundle` on, a locale-suffixed file such as
//! `strings_en.properties` writes its keys into a nested class `strings`
//! shared by every locale of the bundle.

use super::FieldSink;
use crate::diagnostics::SkipReason;
use crate::error::{ApiError, ResourceFormat};
use crate::naming::to_java_name;
use crate::tree::ResourceFile;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertiesOptions {
    /// Group locale-suffixed files into nested classes (default: false).
    #[serde(default)]
    pub write_resource_bundle: bool,
}

pub(crate) fn process(
    options: &PropertiesOptions,
    file: &ResourceFile,
    sink: &mut FieldSink<'_>,
    lowercase_classes: bool,
) -> Result<(), ApiError> {
    let bytes = file.read_bytes()?;
    let text = decode(&bytes);
    let entries =
        parse(&text).map_err(|m| ApiError::parse(&file.path, ResourceFormat::Properties, m))?;

    if options.write_resource_bundle {
        if let Some(bundle) = resource_bundle_name(file) {
            let class_name = if lowercase_classes {
                bundle.to_lowercase()
            } else {
                bundle.to_string()
            };
            match to_java_name(&class_name) {
                Some(name) => {
                    let mut nested = sink.nested(&name);
                    for key in entries.keys() {
                        nested.add_key(key);
                    }
                }
                None => sink.skip(&class_name, SkipReason::Unsanitizable),
            }
            return Ok(());
        }
    }

    for key in entries.keys() {
        sink.add_key(key);
    }
    Ok(())
}

/// Bundle name of `name_xx.properties`, where `xx` is a two-letter locale.
fn resource_bundle_name(file: &ResourceFile) -> Option<&str> {
    if file.name.starts_with('.') {
        return None;
    }
    let (name, locale) = file.base_name().rsplit_once('_')?;
    if locale.chars().count() == 2 {
        Some(name)
    } else {
        None
    }
}

/// UTF-8 first, minus a leading byte order mark; files that are not valid
/// UTF-8 are read as ISO-8859-1.
fn decode(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.strip_prefix('\u{feff}').unwrap_or(text).to_string(),
        Err(_) => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
    }
}

fn is_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\u{c}'
}

/// Parse properties text into key/value pairs, keyed in first-seen order.
///
/// Later duplicates overwrite the value but keep the key's position.
pub(crate) fn parse(text: &str) -> Result<IndexMap<String, String>, String> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut entries = IndexMap::new();
    let mut lines = normalized.split('\n').enumerate();

    while let Some((index, line)) = lines.next() {
        let trimmed = line.trim_start_matches(is_whitespace);
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }
        let mut logical = trimmed.to_string();
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(is_whitespace)),
                None => break,
            }
        }
        let (key, value) =
            split_entry(&logical).map_err(|e| format!("line {}: {}", index + 1, e))?;
        entries.insert(key, value);
    }
    Ok(entries)
}

/// An odd number of trailing backslashes continues the line.
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn split_entry(line: &str) -> Result<(String, String), String> {
    let chars: Vec<char> = line.chars().collect();
    let len = chars.len();
    let mut key_end = len;
    let mut value_start = len;
    let mut has_separator = false;

    let mut i = 0;
    while i < len {
        let c = chars[i];
        if c == '\\' {
            i += 2;
            continue;
        }
        if c == '=' || c == ':' {
            key_end = i;
            value_start = i + 1;
            has_separator = true;
            break;
        }
        if is_whitespace(c) {
            key_end = i;
            value_start = i + 1;
            break;
        }
        i += 1;
    }

    let mut j = value_start;
    while j < len && is_whitespace(chars[j]) {
        j += 1;
    }
    if !has_separator && j < len && (chars[j] == '=' || chars[j] == ':') {
        j += 1;
        while j < len && is_whitespace(chars[j]) {
            j += 1;
        }
    }

    let key = unescape(&chars[..key_end.min(len)])?;
    let value = unescape(&chars[j.min(len)..])?;
    Ok((key, value))
}

fn unescape(chars: &[char]) -> Result<String, String> {
    let mut out = String::with_capacity(chars.len());
    let mut pending_high: Option<u32> = None;
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        i += 1;
        if c != '\\' {
            flush_surrogate(&mut out, &mut pending_high);
            out.push(c);
            continue;
        }
        let next = match chars.get(i) {
            Some(&next) => next,
            None => break,
        };
        i += 1;
        let decoded = match next {
            't' => '\t',
            'n' => '\n',
            'r' => '\r',
            'f' => '\u{c}',
            'u' => {
                let digits = chars
                    .get(i..i + 4)
                    .filter(|d| d.iter().all(|c| c.is_ascii_hexdigit()))
                    .ok_or_else(|| "malformed \\uxxxx encoding".to_string())?;
                i += 4;
                let hex: String = digits.iter().collect();
                let unit = u32::from_str_radix(&hex, 16)
                    .map_err(|_| "malformed \\uxxxx encoding".to_string())?;
                match unit {
                    0xD800..=0xDBFF => {
                        flush_surrogate(&mut out, &mut pending_high);
                        pending_high = Some(unit);
                        continue;
                    }
                    0xDC00..=0xDFFF => {
                        match pending_high.take() {
                            Some(high) => {
                                let code = 0x10000 + ((high - 0xD800) << 10) + (unit - 0xDC00);
                                out.push(char::from_u32(code).unwrap_or('\u{fffd}'));
                            }
                            None => out.push('\u{fffd}'),
                        }
                        continue;
                    }
                    _ => char::from_u32(unit).unwrap_or('\u{fffd}'),
                }
            }
            other => other,
        };
        flush_surrogate(&mut out, &mut pending_high);
        out.push(decoded);
    }
    flush_surrogate(&mut out, &mut pending_high);
    Ok(out)
}

/// A lone high surrogate has no scalar value.
fn flush_surrogate(out: &mut String, pending_high: &mut Option<u32>) {
    if pending_high.take().is_some() {
        out.push('\u{fffd}');
    }
}
