//! Config loading and validation.

use super::model::Config;
use crate::context::{
    DOCKERFILE, DOCKERFILE_TEMPLATE, SOURCE_TREE_DIR, VARIABLES_DIR, VARIABLES_FILE,
};
use crate::error::{BuilderError, Result};
use std::path::{Component, Path};

/// Source entries that staging reads from or copies, so the context may not
/// take their place.
const RESERVED_NAMES: [&str; 5] = [
    SOURCE_TREE_DIR,
    DOCKERFILE,
    DOCKERFILE_TEMPLATE,
    VARIABLES_FILE,
    VARIABLES_DIR,
];

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(BuilderError::Config)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            BuilderError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to a mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| BuilderError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    ///
    /// - `build_tool` and `build_verb` must be non-empty
    /// - `context_dir` must be a single plain directory name that does not
    ///   collide with a source entry (`src`, the Dockerfile, the template or
    ///   the variable sources)
    pub fn validate(&self) -> Result<()> {
        if self.build_tool.trim().is_empty() {
            return Err(BuilderError::Config(
                "build_tool must not be empty".to_string(),
            ));
        }

        if self.build_verb.trim().is_empty() {
            return Err(BuilderError::Config(
                "build_verb must not be empty".to_string(),
            ));
        }

        let mut components = Path::new(&self.context_dir).components();
        let single_name = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !single_name {
            return Err(BuilderError::Config(format!(
                "context_dir must be a plain directory name (found '{}')",
                self.context_dir
            )));
        }

        if RESERVED_NAMES.contains(&self.context_dir.as_str()) {
            return Err(BuilderError::Config(format!(
                "context_dir must not be '{}', which is part of the image source",
                self.context_dir
            )));
        }

        Ok(())
    }
}
