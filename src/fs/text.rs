//! Text helpers for template and variable content.

use std::io;
use std::path::Path;

/// Characters stripped from both ends of names, values and template lines.
const TRIM_CHARS: &[char] = &[' ', '\r', '\n'];

/// Trim spaces and line terminators from both ends of `value`.
///
/// Tabs and other whitespace are kept, so indentation inside a value
/// survives the round trip into the Dockerfile.
pub fn trim_value(value: &str) -> &str {
    value.trim_matches(TRIM_CHARS)
}

/// Read a file as UTF-8 text.
///
/// Invalid UTF-8 is an `InvalidData` error. Templates go through this, since
/// placeholders are matched on text.
pub fn read_to_string(path: &Path) -> io::Result<String> {
    std::fs::read_to_string(path)
}

/// Read a file for display, replacing invalid UTF-8 with `U+FFFD`.
///
/// Plain Dockerfiles are copied byte-for-byte and may use any encoding.
pub fn read_for_display(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
