//! End-to-end build pipeline.
//!
//! Path resolution has already happened when a [`BuildRequest`] exists; the
//! pipeline stages the context, renders the template when there is one, and
//! hands the context to the build tool. Each step consumes the previous
//! step's output, so everything runs sequentially on the calling thread.

use crate::config::Config;
use crate::context::BuildContext;
use crate::error::{BuilderError, Result};
use crate::fs::{atomic_write_file, read_to_string};
use crate::invoker::{self, BuildTool};
use crate::request::BuildRequest;
use crate::stage;
use crate::template::{resolve_file_references, resolve_variables};
use crate::variables;
use std::io::{ErrorKind, Write};
use tracing::{debug, info};

/// Run one complete build.
///
/// Returns the staged context, which is left on disk for inspection.
/// The config is validated before anything under the source is reset.
pub fn run_build(
    request: &BuildRequest,
    config: &Config,
    tool: &dyn BuildTool,
    out: &mut dyn Write,
) -> Result<BuildContext> {
    config.validate()?;

    info!(source = %request.source_path.display(), "source path");
    for library in &request.library_paths {
        info!(library = %library.display(), "library path");
    }

    let context = stage::stage(
        &request.source_path,
        &request.context_path(&config.context_dir),
    )?;

    if context.uses_template {
        render_dockerfile(&context, request)?;
    }

    invoker::invoke(&context, request, config, tool, out)?;

    Ok(context)
}

/// Render the staged template into the context's final Dockerfile.
///
/// File references are resolved before variables are aggregated, so a
/// missing shared file is reported even when variables are also broken.
pub fn render_dockerfile(context: &BuildContext, request: &BuildRequest) -> Result<String> {
    let template_path = context.template_path();
    let template = read_to_string(&template_path).map_err(|e| match e.kind() {
        ErrorKind::InvalidData => BuilderError::Staging(format!(
            "template '{}' is not valid UTF-8",
            template_path.display()
        )),
        _ => BuilderError::Staging(format!(
            "failed to read template '{}': {}",
            template_path.display(),
            e
        )),
    })?;

    let with_files =
        resolve_file_references(&template, &request.library_paths, &context.root_path)?;
    let table = variables::aggregate(&request.source_path, &request.library_paths)?;
    if table.is_empty() {
        debug!("no template variables defined in source or library paths");
    }
    let dockerfile = resolve_variables(&with_files, &table)?;

    atomic_write_file(context.dockerfile_path(), &dockerfile)?;
    info!(variables = table.len(), "rendered Dockerfile from template");

    Ok(dockerfile)
}
