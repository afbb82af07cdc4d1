//! CLI argument parsing for docker-builder.
//!
//! Uses clap derive macros for declarative argument definitions. Validation
//! beyond what clap enforces lives in [`Cli::validate`] so that missing
//! arguments are reported with the same exit code as other user errors.

use crate::error::{BuilderError, Result};
use crate::fs::trim_value;
use clap::Parser;
use std::path::PathBuf;

/// Usage example printed with argument errors and `--help`.
pub const USAGE_EXAMPLE: &str = "\
Usage:
  $ docker-builder --src [SOURCE PATH] (--lib [LIB PATH])* (--dry)? -- [BUILD OPTIONS]
Example:
  $ docker-builder \\
    --src path/to/image/dir \\
    --lib path/to/lib \\
    --lib path/to/another/lib \\
    -- -t my/image:tag";

/// Docker-builder: stage a build context and build an image from a
/// Dockerfile or Dockerfile template.
///
/// A `Dockerfile.template` may reference shared files from library
/// directories with `%%_COMMON/<path>%%` and variables with `%%NAME%%`.
/// Variables come from `Dockerfile.variables` and `Dockerfile.variables.d/`
/// in the source and library directories.
#[derive(Parser, Debug)]
#[command(name = "docker-builder")]
#[command(author, version, about, long_about = None)]
#[command(after_help = USAGE_EXAMPLE)]
pub struct Cli {
    /// Image source directory.
    #[arg(short, long = "src", value_name = "SOURCE PATH")]
    pub src: Option<String>,

    /// Library directory with shared files and variables (repeatable, later wins).
    #[arg(short, long = "lib", value_name = "LIB PATH")]
    pub lib: Vec<String>,

    /// Print the build command and final Dockerfile instead of building.
    #[arg(long = "dry", visible_alias = "dry-run")]
    pub dry: bool,

    /// YAML configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Show debug logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Options passed to the build tool, after `--`.
    #[arg(last = true, value_name = "BUILD OPTIONS")]
    pub build_options: Vec<String>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Source path with surrounding spaces and line terminators removed.
    pub fn source_path(&self) -> &str {
        self.src.as_deref().map(trim_value).unwrap_or("")
    }

    /// Library paths, trimmed, in the order given.
    pub fn library_paths(&self) -> Vec<&str> {
        self.lib.iter().map(|lib| trim_value(lib)).collect()
    }

    /// Check the arguments clap cannot express.
    ///
    /// # Errors
    ///
    /// * `BuilderError::UserError` - missing source directory or build options
    pub fn validate(&self) -> Result<()> {
        if self.source_path().is_empty() {
            return Err(BuilderError::UserError(
                "missing source directory".to_string(),
            ));
        }

        if self.build_options.is_empty() {
            return Err(BuilderError::UserError("missing build options".to_string()));
        }

        Ok(())
    }
}
