//! The two resolution passes.

use super::placeholder::{
    file_reference_regex, file_references, variable_reference_regex, variable_references,
};
use crate::error::{BuilderError, Result};
use crate::fs::copy_path;
use crate::variables::VariableTable;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Resolve every `%%_COMMON/<path>%%` placeholder in `template`.
///
/// Libraries are searched in the order given; the first one containing
/// `<path>` wins and its file (or directory) is copied to the same relative
/// path under `context_root`. Each placeholder is replaced by `<path>`.
///
/// # Errors
///
/// * `BuilderError::UnresolvedFileReference` - no library holds the path, or
///   the path is absolute or leaves the library directory
/// * `BuilderError::Staging` - the file could not be copied
pub fn resolve_file_references(
    template: &str,
    libraries: &[PathBuf],
    context_root: &Path,
) -> Result<String> {
    let mut replacements = HashMap::new();

    for file_ref in file_references(template) {
        let relative = checked_relative_path(&file_ref.path).ok_or_else(|| {
            BuilderError::UnresolvedFileReference {
                reference: file_ref.reference.clone(),
                reason: "path must be relative and stay inside the library directory".to_string(),
            }
        })?;

        let library = find_in_libraries(libraries, relative)?.ok_or_else(|| {
            BuilderError::UnresolvedFileReference {
                reference: file_ref.reference.clone(),
                reason: if libraries.is_empty() {
                    "no library paths were supplied".to_string()
                } else {
                    "not found in any library path".to_string()
                },
            }
        })?;

        copy_path(&library.join(relative), &context_root.join(relative))?;
        debug!(
            reference = %file_ref.reference,
            library = %library.display(),
            "resolved file reference"
        );

        replacements.insert(file_ref.placeholder, file_ref.path);
    }

    Ok(replace_placeholders(file_reference_regex(), template, &replacements))
}

/// Resolve every remaining `%%<name>%%` placeholder from `variables`.
///
/// Must run after [`resolve_file_references`].
///
/// # Errors
///
/// * `BuilderError::UnresolvedVariable` - the name is undefined or its
///   value is empty
pub fn resolve_variables(template: &str, variables: &VariableTable) -> Result<String> {
    let mut replacements = HashMap::new();

    for var_ref in variable_references(template) {
        let value = variables
            .get(&var_ref.name)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| BuilderError::UnresolvedVariable(var_ref.name.clone()))?;

        debug!(name = %var_ref.name, "resolved variable reference");
        replacements.insert(var_ref.placeholder, value.to_string());
    }

    Ok(replace_placeholders(variable_reference_regex(), template, &replacements))
}

/// Substitute every match of `regex` whose full text has a replacement.
///
/// Works on the original text only, so inserted values are never rescanned.
fn replace_placeholders(
    regex: &Regex,
    template: &str,
    replacements: &HashMap<String, String>,
) -> String {
    regex
        .replace_all(template, |caps: &Captures| {
            replacements
                .get(&caps[0])
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// First library directory that contains `relative`.
fn find_in_libraries<'a>(libraries: &'a [PathBuf], relative: &Path) -> Result<Option<&'a Path>> {
    for library in libraries {
        let candidate = library.join(relative);
        let found = candidate.try_exists().map_err(|e| {
            BuilderError::Staging(format!("failed to inspect '{}': {}", candidate.display(), e))
        })?;
        if found {
            return Ok(Some(library.as_path()));
        }
    }
    Ok(None)
}

/// Accept only non-empty relative paths made of normal components.
fn checked_relative_path(path: &str) -> Option<&Path> {
    let path = Path::new(path);
    let mut has_normal = false;

    for component in path.components() {
        match component {
            Component::Normal(_) => has_normal = true,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    has_normal.then_some(path)
}
