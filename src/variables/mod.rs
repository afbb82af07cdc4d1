//! Variable aggregation for Dockerfile templates.
//!
//! Variables come from two kinds of sources, both optional:
//!
//! - `Dockerfile.variables`: one `NAME: value` pair per line
//! - `Dockerfile.variables.d/`: one file per variable, file name is the
//!   variable name and the trimmed content is the value
//!
//! Sources are merged lowest to highest precedence:
//!
//! 1. the source directory's flat file
//! 2. each library's flat file, in the order supplied
//! 3. the source directory's fragment directory
//! 4. each library's fragment directory, in the order supplied
//!
//! so any fragment beats any flat file, and later libraries beat earlier ones.


use crate::context::{VARIABLES_DIR, VARIABLES_FILE};
use crate::error::{BuilderError, Result};
use crate::fs::{read_to_string, trim_value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolved variable values keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableTable {
    values: HashMap<String, String>,
}

impl VariableTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a variable. Name and value are trimmed.
    pub fn insert(&mut self, name: &str, value: &str) {
        self.values
            .insert(trim_value(name).to_string(), trim_value(value).to_string());
    }

    /// Value of `name`, if defined.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Overwrite entries with those from `other`.
    pub fn merge(&mut self, other: VariableTable) {
        self.values.extend(other.values);
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for VariableTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = VariableTable::new();
        for (name, value) in iter {
            table.insert(name.as_ref(), value.as_ref());
        }
        table
    }
}

/// Aggregate variables from the source directory and every library.
pub fn aggregate(source: &Path, libraries: &[PathBuf]) -> Result<VariableTable> {
    let roots: Vec<&Path> = std::iter::once(source)
        .chain(libraries.iter().map(PathBuf::as_path))
        .collect();

    let mut table = VariableTable::new();

    for root in &roots {
        let path = root.join(VARIABLES_FILE);
        if let Some(vars) = read_flat_file(&path)? {
            debug!(path = %path.display(), count = vars.len(), "read variables file");
            table.merge(vars);
        }
    }

    for root in &roots {
        let path = root.join(VARIABLES_DIR);
        if let Some(vars) = read_fragment_dir(&path)? {
            debug!(path = %path.display(), count = vars.len(), "read variable fragments");
            table.merge(vars);
        }
    }

    Ok(table)
}

/// Parse the contents of a flat variables file.
///
/// Each line is split on its first `:`. Lines without a `:` or with an empty
/// name are skipped; a later line overrides an earlier one.
pub fn parse_flat(content: &str) -> VariableTable {
    trim_value(content)
        .split('\n')
        .filter_map(|line| trim_value(line).split_once(':'))
        .filter(|(name, _)| !trim_value(name).is_empty())
        .collect()
}

/// Read a flat variables file. Returns `None` if it does not exist.
pub fn read_flat_file(path: &Path) -> Result<Option<VariableTable>> {
    if !exists(path)? {
        return Ok(None);
    }

    let content = read_to_string(path).map_err(|e| read_error(path, e))?;
    Ok(Some(parse_flat(&content)))
}

/// Read a fragment directory. Returns `None` if it does not exist.
///
/// Fragments are read in file-name order. Entries that are not regular files
/// are skipped.
pub fn read_fragment_dir(path: &Path) -> Result<Option<VariableTable>> {
    if !exists(path)? {
        return Ok(None);
    }

    let mut entries = fs::read_dir(path)
        .map_err(|e| read_error(path, e))?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| read_error(path, e))?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut table = VariableTable::new();
    for entry in entries {
        let fragment = entry.path();
        let metadata = fs::metadata(&fragment).map_err(|e| read_error(&fragment, e))?;
        if !metadata.is_file() {
            debug!(path = %fragment.display(), "skipping non-file fragment entry");
            continue;
        }

        let file_name = entry.file_name();
        let name = file_name.to_str().ok_or_else(|| {
            BuilderError::VariableRead(format!(
                "fragment name '{}' is not valid UTF-8",
                fragment.display()
            ))
        })?;
        if trim_value(name).is_empty() {
            continue;
        }

        let content = read_to_string(&fragment).map_err(|e| read_error(&fragment, e))?;
        table.insert(name, &content);
    }

    Ok(Some(table))
}

fn exists(path: &Path) -> Result<bool> {
    path.try_exists().map_err(|e| read_error(path, e))
}

fn read_error(path: &Path, e: std::io::Error) -> BuilderError {
    BuilderError::VariableRead(format!("'{}': {}", path.display(), e))
}
