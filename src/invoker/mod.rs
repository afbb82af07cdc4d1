//! External build tool invocation.
//!
//! The build tool is treated as a black box: a program, a fixed verb, the
//! caller's option tokens in order, and the build-context path last. Option
//! tokens are never re-split or re-quoted.

mod preview;
mod process;

pub use preview::{format_preview, write_preview};
pub use process::ProcessBuildTool;

use crate::config::Config;
use crate::context::BuildContext;
use crate::error::{BuilderError, Result};
use crate::fs::read_for_display;
use crate::request::BuildRequest;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, info};

/// A fully composed build tool command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Executable to launch.
    pub program: String,
    /// Fixed verb, first argument.
    pub verb: String,
    /// Caller-supplied option tokens.
    pub options: Vec<String>,
    /// Build-context path, final argument.
    pub context_path: PathBuf,
}

impl Invocation {
    pub fn new(config: &Config, request: &BuildRequest, context: &BuildContext) -> Self {
        Self {
            program: config.build_tool.clone(),
            verb: config.build_verb.clone(),
            options: request.build_options.clone(),
            context_path: context.root_path.clone(),
        }
    }

    /// Arguments passed to the program, in order.
    pub fn args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(self.options.len() + 2);
        args.push(self.verb.clone());
        args.extend(self.options.iter().cloned());
        args.push(self.context_path.to_string_lossy().into_owned());
        args
    }

    /// Shell-quoted rendering of the full command, for display only.
    pub fn command_line(&self) -> String {
        let mut words = vec![self.program.clone()];
        words.extend(self.args());
        shell_words::join(words)
    }
}

/// Something that can run an image build.
pub trait BuildTool {
    /// Run the build, blocking until it finishes.
    ///
    /// Returns `BuilderError::BuildTool` if the tool cannot be launched or
    /// exits unsuccessfully.
    fn run(&self, invocation: &Invocation) -> Result<()>;
}

/// Remove the resolved template from the context, leaving only the Dockerfile.
pub fn finalize_context(context: &BuildContext) -> Result<()> {
    let template = context.template_path();
    match fs::remove_file(&template) {
        Ok(()) => {
            debug!(path = %template.display(), "removed template artifact");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(BuilderError::Staging(format!(
            "failed to remove '{}': {}",
            template.display(),
            e
        ))),
    }
}

/// Finalize the context, then preview or run the build.
///
/// In dry-run mode the command and Dockerfile are written to `out` and no
/// process is started.
pub fn invoke(
    context: &BuildContext,
    request: &BuildRequest,
    config: &Config,
    tool: &dyn BuildTool,
    out: &mut dyn Write,
) -> Result<()> {
    finalize_context(context)?;

    let invocation = Invocation::new(config, request, context);

    if request.dry_run {
        let dockerfile = read_for_display(&context.dockerfile_path()).map_err(|e| {
            BuilderError::Staging(format!(
                "failed to read '{}': {}",
                context.dockerfile_path().display(),
                e
            ))
        })?;
        return write_preview(out, &invocation, &dockerfile);
    }

    info!(command = %invocation.command_line(), "running build tool");
    tool.run(&invocation)
}
