//! Name character rules for Vellum attribute and tag names.

/// Returns true if every character of `name` is an ASCII letter, digit,
/// underscore, or hyphen. The empty string is safe.
///
/// Attribute and include-tag names travel through include directives and
/// attribute references unescaped, so anything outside this set would
/// change how the surrounding markup parses.
#[must_use]
pub fn is_safe_name(name: &str) -> bool {
    name.bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}
