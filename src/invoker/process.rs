//! Build tool backed by a child process.

use super::{BuildTool, Invocation};
use crate::error::{BuilderError, Result};
use std::process::{Command, Stdio};

/// Runs the build tool as a child process sharing the caller's stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessBuildTool;

impl BuildTool for ProcessBuildTool {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        let status = Command::new(&invocation.program)
            .args(invocation.args())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| {
                BuilderError::BuildTool(format!(
                    "failed to execute '{}': {}\n\
                     Fix: ensure the build tool is installed and in PATH.",
                    invocation.program, e
                ))
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(BuilderError::BuildTool(format!(
                "'{}' exited with {}",
                invocation.command_line(),
                status
            )))
        }
    }
}
