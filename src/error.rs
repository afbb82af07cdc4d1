//! Error types for the docker-builder CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.
//! Every error is terminal for the current build.

use crate::context::{DOCKERFILE, DOCKERFILE_TEMPLATE};
use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for docker-builder operations.
#[derive(Error, Debug)]
pub enum BuilderError {
    /// User provided invalid arguments.
    #[error("{0}")]
    UserError(String),

    /// The configuration file could not be read or failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A source or library path could not be made absolute.
    #[error("unable to determine absolute path: {0}")]
    PathResolution(String),

    /// Resetting or populating the build context failed.
    #[error("failed to stage build context: {0}")]
    Staging(String),

    /// The source directory has neither a template nor a plain Dockerfile.
    #[error(
        "either {} or {} is required in '{}'",
        DOCKERFILE_TEMPLATE,
        DOCKERFILE,
        .0.display()
    )]
    MissingDockerfile(PathBuf),

    /// A `%%_COMMON/...%%` reference could not be satisfied by any library path.
    #[error("unable to locate file for: {reference} ({reason})")]
    UnresolvedFileReference { reference: String, reason: String },

    /// A `%%NAME%%` reference has no value, or only an empty one.
    #[error("unable to locate value for: {0}")]
    UnresolvedVariable(String),

    /// An existing variables file or fragment could not be read.
    #[error("failed to read variables: {0}")]
    VariableRead(String),

    /// The external build tool could not be launched or exited with failure.
    #[error("build tool failed: {0}")]
    BuildTool(String),
}

impl BuilderError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            BuilderError::UserError(_) => exit_codes::USER_ERROR,
            BuilderError::Config(_) => exit_codes::USER_ERROR,
            BuilderError::PathResolution(_) => exit_codes::USER_ERROR,
            BuilderError::Staging(_) => exit_codes::STAGING_FAILURE,
            BuilderError::MissingDockerfile(_) => exit_codes::TEMPLATE_FAILURE,
            BuilderError::UnresolvedFileReference { .. } => exit_codes::TEMPLATE_FAILURE,
            BuilderError::UnresolvedVariable(_) => exit_codes::TEMPLATE_FAILURE,
            BuilderError::VariableRead(_) => exit_codes::TEMPLATE_FAILURE,
            BuilderError::BuildTool(_) => exit_codes::BUILD_TOOL_FAILURE,
        }
    }
}

/// Result type alias for docker-builder operations.
pub type Result<T> = std::result::Result<T, BuilderError>;
