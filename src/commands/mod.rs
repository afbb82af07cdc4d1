//! Command implementation for docker-builder.
//!
//! Turns parsed arguments into a [`BuildRequest`], loads configuration and
//! runs the build pipeline against the real build tool.

use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;
use crate::invoker::{BuildTool, ProcessBuildTool};
use crate::pipeline;
use crate::request::BuildRequest;
use std::io::Write;

/// Run the build described by `cli`.
pub fn dispatch(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    cmd_build(cli, &ProcessBuildTool, &mut stdout.lock())
}

/// Validate arguments, resolve paths and run one build.
pub fn cmd_build(cli: Cli, tool: &dyn BuildTool, out: &mut dyn Write) -> Result<()> {
    cli.validate()?;

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let request = BuildRequest::resolve(
        cli.source_path(),
        &cli.library_paths(),
        cli.build_options.clone(),
        cli.dry,
    )?;

    pipeline::run_build(&request, &config, tool, out)?;
    Ok(())
}
