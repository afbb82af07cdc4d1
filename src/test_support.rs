use crate::error::{BuilderError, Result};
use crate::invoker::{BuildTool, Invocation};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Temporary workspace holding one source directory and any number of
/// library directories.
pub(crate) struct Workspace {
    temp_dir: TempDir,
}

impl Workspace {
    pub(crate) fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir_all(temp_dir.path().join("image")).unwrap();
        Self { temp_dir }
    }

    /// The image source directory.
    pub(crate) fn source(&self) -> PathBuf {
        self.temp_dir.path().join("image")
    }

    /// A library directory, created on first use.
    pub(crate) fn library(&self, name: &str) -> PathBuf {
        let path = self.temp_dir.path().join("libs").join(name);
        std::fs::create_dir_all(&path).unwrap();
        path
    }

    /// Write a file relative to the source directory.
    pub(crate) fn write_source(&self, relative: &str, content: &str) -> PathBuf {
        write_file(&self.source(), relative, content)
    }

    /// Write a file relative to a library directory.
    pub(crate) fn write_library(&self, name: &str, relative: &str, content: &str) -> PathBuf {
        write_file(&self.library(name), relative, content)
    }
}

pub(crate) fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}

/// Build tool fake that records every invocation instead of running it.
#[derive(Default)]
pub(crate) struct RecordingBuildTool {
    pub(crate) invocations: RefCell<Vec<Invocation>>,
    pub(crate) fail_with: Option<String>,
}

impl RecordingBuildTool {
    pub(crate) fn failing(message: &str) -> Self {
        Self {
            invocations: RefCell::new(Vec::new()),
            fail_with: Some(message.to_string()),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.invocations.borrow().len()
    }
}

impl BuildTool for RecordingBuildTool {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        self.invocations.borrow_mut().push(invocation.clone());
        match &self.fail_with {
            Some(message) => Err(BuilderError::BuildTool(message.clone())),
            None => Ok(()),
        }
    }
}
