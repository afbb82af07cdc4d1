//! Config struct definition and default implementation.

use crate::context::DEFAULT_CONTEXT_DIR;
use serde::{Deserialize, Serialize};

/// Configuration for a docker-builder run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Executable of the external image build tool (default: "docker").
    #[serde(default = "default_build_tool")]
    pub build_tool: String,

    /// Verb passed as the first argument to the build tool (default: "build").
    #[serde(default = "default_build_verb")]
    pub build_verb: String,

    /// Name of the build-context directory created inside the source
    /// directory (default: "_docker-build").
    #[serde(default = "default_context_dir")]
    pub context_dir: String,
}

fn default_build_tool() -> String {
    "docker".to_string()
}
fn default_build_verb() -> String {
    "build".to_string()
}
fn default_context_dir() -> String {
    DEFAULT_CONTEXT_DIR.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            build_tool: default_build_tool(),
            build_verb: default_build_verb(),
            context_dir: default_context_dir(),
        }
    }
}
