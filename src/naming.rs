//! Java identifier validation and repair.
//!
//! Every class and field name that ends up in generated source passes through
//! [`to_java_name`]. The function is total: it either returns a name that
//! [`is_java_name`] accepts or `None`, in which case the caller drops the
//! class or field.

use unicode_normalization::UnicodeNormalization;

/// Java keywords plus the `true`, `false` and `null` literals.
const RESERVED: &[&str] = &[
    "abstract",
    "assert",
    "boolean",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "class",
    "const",
    "continue",
    "default",
    "do",
    "double",
    "else",
    "enum",
    "extends",
    "false",
    "final",
    "finally",
    "float",
    "for",
    "goto",
    "if",
    "implements",
    "import",
    "instanceof",
    "int",
    "interface",
    "long",
    "native",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "short",
    "static",
    "strictfp",
    "super",
    "switch",
    "synchronized",
    "this",
    "throw",
    "throws",
    "transient",
    "true",
    "try",
    "void",
    "volatile",
    "while",
];

/// Code points that Unicode keeps in `XID_Start`/`XID_Continue` for stability
/// (`Other_ID_Start`, `Other_ID_Continue`) but that are not letters, digits or
/// combining marks, so `javac` rejects them.
const NON_JAVA_XID: &[char] = &[
    '\u{00B7}', '\u{0387}', '\u{1369}', '\u{136A}', '\u{136B}', '\u{136C}', '\u{136D}',
    '\u{136E}', '\u{136F}', '\u{1370}', '\u{1371}', '\u{19DA}', '\u{2118}', '\u{212E}',
    '\u{309B}', '\u{309C}', '\u{30FB}', '\u{FF65}',
];

/// `_` or an `XID_Start` letter; `U+1885`/`U+1886` are marks and may not start a name.
pub fn is_identifier_start(c: char) -> bool {
    c == '_'
        || (unicode_ident::is_xid_start(c)
            && !NON_JAVA_XID.contains(&c)
            && !matches!(c, '\u{1885}' | '\u{1886}'))
}

pub fn is_identifier_part(c: char) -> bool {
    c == '_' || (unicode_ident::is_xid_continue(c) && !NON_JAVA_XID.contains(&c))
}

/// Whether `s` is a keyword or one of the `true`/`false`/`null` literals.
pub fn is_reserved(s: &str) -> bool {
    RESERVED.contains(&s)
}

/// Check if `s` can be used verbatim as a Java class or field name.
///
/// A bare `_` is rejected: it has been a keyword since Java 9.
pub fn is_java_name(s: &str) -> bool {
    let mut chars = s.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return false,
    };
    if s == "_" || is_reserved(s) {
        return false;
    }
    is_identifier_start(first) && chars.all(is_identifier_part)
}

/// Check if `s` is a dotted package name made of valid Java names.
pub fn is_package_name(s: &str) -> bool {
    !s.is_empty() && s.split('.').all(is_java_name)
}

/// Fix an invalid name, or `None` if it cannot be fixed.
///
/// Valid names are returned unchanged. Otherwise the name is NFC-normalized,
/// prefixed with `_` when it does not start with an identifier-start
/// character, every non identifier-part character becomes `_`, runs of
/// underscores collapse to one, and a reserved result gets one more `_`.
pub fn to_java_name(raw: &str) -> Option<String> {
    if is_java_name(raw) {
        return Some(raw.to_string());
    }
    let normalized: String = raw.nfc().collect();
    let first = normalized.chars().next()?;

    let mut result = String::with_capacity(normalized.len() + 1);
    if !is_identifier_start(first) {
        result.push('_');
    }
    result.extend(
        normalized
            .chars()
            .map(|c| if is_identifier_part(c) { c } else { '_' }),
    );
    while result.contains("__") {
        result = result.replace("__", "_");
    }
    if is_reserved(&result) {
        result.insert(0, '_');
    }

    if is_java_name(&result) {
        Some(result)
    } else {
        None
    }
}
