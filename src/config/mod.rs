//! Configuration model for docker-builder.
//!
//! An optional YAML file (passed with `--config`) can override which build
//! tool runs and where the build context is staged. Every field has a
//! default, and unknown fields are ignored for forward compatibility.

mod model;
mod operations;


pub use model::Config;
