//! Build requests and path resolution.
//!
//! A [`BuildRequest`] is the validated input of one build: where the image
//! sources live, which library directories to consult (in order), and the
//! opaque option tokens for the build tool.

use crate::error::{BuilderError, Result};
use std::path::{Path, PathBuf};

/// One build invocation's input. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    /// Absolute path to the image source directory.
    pub source_path: PathBuf,

    /// Absolute library directories, in the order the caller supplied them.
    pub library_paths: Vec<PathBuf>,

    /// Option tokens forwarded to the build tool untouched.
    pub build_options: Vec<String>,

    /// Print the command and Dockerfile instead of running the build tool.
    pub dry_run: bool,
}

impl BuildRequest {
    /// Resolve raw paths into a request.
    ///
    /// Paths are made absolute against the current working directory without
    /// touching the filesystem: nothing has to exist yet and symlinks are not
    /// followed.
    ///
    /// # Errors
    ///
    /// * `BuilderError::PathResolution` - empty path, or the working directory
    ///   could not be determined
    pub fn resolve<S, L>(
        source: S,
        libraries: &[L],
        build_options: Vec<String>,
        dry_run: bool,
    ) -> Result<Self>
    where
        S: AsRef<Path>,
        L: AsRef<Path>,
    {
        let source_path = absolute_path(source.as_ref())?;
        let library_paths = libraries
            .iter()
            .map(|lib| absolute_path(lib.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            source_path,
            library_paths,
            build_options,
            dry_run,
        })
    }

    /// Absolute path of the build context for this request.
    pub fn context_path(&self, context_dir: &str) -> PathBuf {
        self.source_path.join(context_dir)
    }
}

/// Make `path` absolute without requiring it to exist.
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| {
        BuilderError::PathResolution(format!("'{}': {}", path.display(), e))
    })
}
