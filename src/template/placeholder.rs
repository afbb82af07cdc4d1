//! Placeholder scanning.

use crate::fs::trim_value;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static FILE_REFERENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%%(_COMMON/([^%]+))%%").expect("Invalid file reference regex")
});

static VARIABLE_REFERENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%%([^%]+)%%").expect("Invalid variable reference regex"));

pub(crate) fn file_reference_regex() -> &'static Regex {
    &FILE_REFERENCE_REGEX
}

pub(crate) fn variable_reference_regex() -> &'static Regex {
    &VARIABLE_REFERENCE_REGEX
}

/// A `%%_COMMON/<path>%%` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    /// Full placeholder text, delimiters included.
    pub placeholder: String,
    /// `_COMMON/<path>` as written, used in error messages.
    pub reference: String,
    /// Relative path inside a library directory, trimmed.
    pub path: String,
}

/// A `%%<name>%%` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableReference {
    /// Full placeholder text, delimiters included.
    pub placeholder: String,
    /// Variable name, trimmed.
    pub name: String,
}

/// Distinct file references in order of first appearance.
pub fn file_references(template: &str) -> Vec<FileReference> {
    let mut seen = HashSet::new();
    file_reference_regex()
        .captures_iter(template)
        .filter(|caps| seen.insert(caps[0].to_string()))
        .map(|caps| FileReference {
            placeholder: caps[0].to_string(),
            reference: trim_value(&caps[1]).to_string(),
            path: trim_value(&caps[2]).to_string(),
        })
        .collect()
}

/// Distinct variable references in order of first appearance.
///
/// Run this only after file references are resolved: a `%%_COMMON/...%%`
/// placeholder also matches the variable grammar.
pub fn variable_references(template: &str) -> Vec<VariableReference> {
    let mut seen = HashSet::new();
    variable_reference_regex()
        .captures_iter(template)
        .filter(|caps| seen.insert(caps[0].to_string()))
        .map(|caps| VariableReference {
            placeholder: caps[0].to_string(),
            name: trim_value(&caps[1]).to_string(),
        })
        .collect()
}
