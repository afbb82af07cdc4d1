//! Dry-run preview output.

use super::Invocation;
use crate::error::{BuilderError, Result};
use crate::fs::trim_value;
use std::io::Write;

/// Render the dry-run preview for `invocation` and the final Dockerfile.
pub fn format_preview(invocation: &Invocation, dockerfile: &str) -> String {
    format!(
        "*** DRY RUN > Build Command:\n{}\n\n*** DRY RUN > Dockerfile:\n{}\n",
        invocation.command_line(),
        trim_value(dockerfile)
    )
}

/// Write the dry-run preview to `out`.
pub fn write_preview(out: &mut dyn Write, invocation: &Invocation, dockerfile: &str) -> Result<()> {
    out.write_all(format_preview(invocation, dockerfile).as_bytes())
        .and_then(|()| out.flush())
        .map_err(|e| BuilderError::Staging(format!("failed to write dry-run preview: {}", e)))
}
