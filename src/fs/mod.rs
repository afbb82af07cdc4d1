//! Filesystem utilities for docker-builder.
//!
//! Stateless helpers shared by the stager and the reference resolver:
//! recursive copies into the build context, atomic writes for the final
//! Dockerfile, and the trimming rule applied to every name and value.

pub mod atomic;
mod copy;
mod text;

pub use atomic::atomic_write_file;
pub use copy::copy_path;
pub use text::{read_for_display, read_to_string, trim_value};
