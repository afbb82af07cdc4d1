//! Build-context staging.
//!
//! Every build starts from an empty context directory: the previous one is
//! removed, recreated, and populated with the Dockerfile (or its template)
//! and the optional `src` tree from the source directory.

#[cfg(test)]
mod tests;

use crate::context::{
    BuildContext, DOCKERFILE, DOCKERFILE_TEMPLATE, DockerfileKind, SOURCE_TREE_DIR,
};
use crate::error::{BuilderError, Result};
use crate::fs::copy_path;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info};

/// Reset, populate and classify the build context for `source`.
///
/// The context is rebuilt at `context_root` even when the source turns out
/// to have no Dockerfile; the classification error is reported afterwards.
pub fn stage(source: &Path, context_root: &Path) -> Result<BuildContext> {
    reset_context(context_root)?;
    populate_context(source, context_root)?;
    let kind = classify(source)?;

    info!(
        context = %context_root.display(),
        dockerfile = kind.file_name(),
        "staged build context"
    );

    Ok(BuildContext::new(context_root.to_path_buf(), kind))
}

/// Delete anything at `path` and recreate it as an empty directory.
///
/// Safe to retry after a failure: the next call resets again.
pub fn reset_context(path: &Path) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(metadata) => {
            let removed = if metadata.is_dir() {
                fs::remove_dir_all(path)
            } else {
                fs::remove_file(path)
            };
            removed.map_err(|e| {
                BuilderError::Staging(format!(
                    "failed to remove existing context '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            debug!(path = %path.display(), "removed previous build context");
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(BuilderError::Staging(format!(
                "failed to inspect context '{}': {}",
                path.display(),
                e
            )));
        }
    }

    create_context_dir(path).map_err(|e| {
        BuilderError::Staging(format!(
            "failed to create context '{}': {}",
            path.display(),
            e
        ))
    })
}

#[cfg(unix)]
fn create_context_dir(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new().recursive(true).mode(0o755).create(path)
}

#[cfg(not(unix))]
fn create_context_dir(path: &Path) -> io::Result<()> {
    fs::DirBuilder::new().recursive(true).create(path)
}

/// Copy the Dockerfile flavor and the `src` tree into the context.
///
/// The template wins over a plain Dockerfile; only one of them is copied.
/// Returns the flavor that was copied, if any.
pub fn populate_context(source: &Path, context_root: &Path) -> Result<Option<DockerfileKind>> {
    let copied = if exists(&source.join(DOCKERFILE_TEMPLATE))? {
        Some(DockerfileKind::Template)
    } else if exists(&source.join(DOCKERFILE))? {
        Some(DockerfileKind::Plain)
    } else {
        None
    };

    if let Some(kind) = copied {
        copy_path(
            &source.join(kind.file_name()),
            &context_root.join(kind.file_name()),
        )?;
    }

    let source_tree = source.join(SOURCE_TREE_DIR);
    if exists(&source_tree)? {
        let files = copy_path(&source_tree, &context_root.join(SOURCE_TREE_DIR))?;
        debug!(files, "copied source tree");
    }

    Ok(copied)
}

/// Decide which Dockerfile flavor the source directory provides.
///
/// # Errors
///
/// * `BuilderError::MissingDockerfile` - neither a template nor a Dockerfile exists
pub fn classify(source: &Path) -> Result<DockerfileKind> {
    if exists(&source.join(DOCKERFILE_TEMPLATE))? {
        Ok(DockerfileKind::Template)
    } else if exists(&source.join(DOCKERFILE))? {
        Ok(DockerfileKind::Plain)
    } else {
        Err(BuilderError::MissingDockerfile(source.to_path_buf()))
    }
}

/// Existence check that only treats "not found" as absence.
fn exists(path: &Path) -> Result<bool> {
    path.try_exists().map_err(|e| {
        BuilderError::Staging(format!("failed to inspect '{}': {}", path.display(), e))
    })
}
