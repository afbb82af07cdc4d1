//! Source layout and build-context paths.
//!
//! Names of every artifact docker-builder reads from a source or library
//! directory, and the [`BuildContext`] describing the staged directory handed
//! to the build tool. All paths held here are absolute.

use std::path::PathBuf;

/// Plain Dockerfile, copied verbatim when no template exists.
pub const DOCKERFILE: &str = "Dockerfile";

/// Dockerfile template with `%%...%%` placeholders. Wins over [`DOCKERFILE`].
pub const DOCKERFILE_TEMPLATE: &str = "Dockerfile.template";

/// Flat `NAME: value` variables file.
pub const VARIABLES_FILE: &str = "Dockerfile.variables";

/// Directory of one-variable-per-file fragments.
pub const VARIABLES_DIR: &str = "Dockerfile.variables.d";

/// Optional source tree copied into the context as-is.
pub const SOURCE_TREE_DIR: &str = "src";

/// Default name of the build-context directory inside the source directory.
pub const DEFAULT_CONTEXT_DIR: &str = "_docker-build";

/// Which Dockerfile flavor a source directory provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockerfileKind {
    /// `Dockerfile.template` is present and must be resolved.
    Template,
    /// Only a plain `Dockerfile` is present.
    Plain,
}

impl DockerfileKind {
    /// File name of this flavor inside the source directory.
    pub fn file_name(self) -> &'static str {
        match self {
            DockerfileKind::Template => DOCKERFILE_TEMPLATE,
            DockerfileKind::Plain => DOCKERFILE,
        }
    }
}

/// A staged build context.
///
/// Created fresh for every build and left in place afterwards, since the
/// directory itself is the build tool's input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    /// Absolute path to the context directory.
    pub root_path: PathBuf,

    /// Whether the Dockerfile must be rendered from a template.
    pub uses_template: bool,
}

impl BuildContext {
    pub fn new(root_path: PathBuf, kind: DockerfileKind) -> Self {
        Self {
            root_path,
            uses_template: kind == DockerfileKind::Template,
        }
    }

    /// Path to the final Dockerfile inside the context.
    pub fn dockerfile_path(&self) -> PathBuf {
        self.root_path.join(DOCKERFILE)
    }

    /// Path to the staged template inside the context.
    pub fn template_path(&self) -> PathBuf {
        self.root_path.join(DOCKERFILE_TEMPLATE)
    }
}
