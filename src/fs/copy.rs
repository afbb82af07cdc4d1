//! Recursive copy into the build context.

use crate::error::{BuilderError, Result};
use std::fs;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Copy a file or a whole directory tree from `source` to `target`.
///
/// Parent directories of `target` are created as needed. Symlinks are
/// followed so the context always receives real file contents. Returns the
/// number of files copied.
pub fn copy_path(source: &Path, target: &Path) -> Result<usize> {
    let metadata = fs::metadata(source).map_err(|e| {
        BuilderError::Staging(format!("failed to inspect '{}': {}", source.display(), e))
    })?;

    if metadata.is_file() {
        copy_file(source, target)?;
        return Ok(1);
    }

    let mut copied = 0;
    for entry in WalkDir::new(source).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            BuilderError::Staging(format!("failed to walk '{}': {}", source.display(), e))
        })?;

        let relative = entry.path().strip_prefix(source).map_err(|e| {
            BuilderError::Staging(format!(
                "unexpected path '{}' while copying '{}': {}",
                entry.path().display(),
                source.display(),
                e
            ))
        })?;
        let destination = target.join(relative);

        if entry.file_type().is_dir() {
            create_dir(&destination)?;
        } else {
            copy_file(entry.path(), &destination)?;
            copied += 1;
        }
    }

    Ok(copied)
}

fn copy_file(source: &Path, target: &Path) -> Result<()> {
    if let Some(parent) = target.parent() {
        create_dir(parent)?;
    }

    fs::copy(source, target).map_err(|e| {
        BuilderError::Staging(format!(
            "failed to copy '{}' to '{}': {}",
            source.display(),
            target.display(),
            e
        ))
    })?;
    debug!(from = %source.display(), to = %target.display(), "copied file");

    Ok(())
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| {
        BuilderError::Staging(format!(
            "failed to create directory '{}': {}",
            path.display(),
            e
        ))
    })
}
