//! Dockerfile template resolution.
//!
//! A template may contain two kinds of `%%...%%` placeholders:
//!
//! - `%%_COMMON/<relative-path>%%` - a file reference. The first library
//!   directory holding `<relative-path>` supplies the file, which is copied
//!   into the build context; the placeholder becomes the bare relative path.
//! - `%%<name>%%` - a variable reference, replaced by the variable's value.
//!
//! Resolution runs as two ordered passes, each taking the previous text and
//! producing a new one. File references are resolved first so their paths
//! never reach the variable scan. Identical placeholder text always resolves
//! to the same replacement, wherever it appears.
//!
//! Resolution is fail-safe: any placeholder that cannot be resolved aborts
//! the build rather than being left in the Dockerfile.

mod placeholder;
mod resolve;


pub use placeholder::{FileReference, VariableReference, file_references, variable_references};
pub use resolve::{resolve_file_references, resolve_variables};
