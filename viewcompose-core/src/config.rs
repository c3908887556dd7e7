//! YAML configuration for bound compositions.
//!
//! ```yaml
//! compose: body          # composition key, default "content"
//! templates: ./views     # optional template directory
//! defaults:              # merged beneath every decorate/render call
//!   title: Home
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigError;
use crate::types::{OptionSet, COMPOSE_OPTION, DEFAULT_COMPOSE_KEY};

/// Default file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "viewcompose.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposeConfig {
    #[serde(default = "default_compose")]
    pub compose: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates: Option<PathBuf>,
    #[serde(default)]
    pub defaults: OptionSet,
}

fn default_compose() -> String {
    DEFAULT_COMPOSE_KEY.to_string()
}

impl Default for ComposeConfig {
    fn default() -> Self {
        ComposeConfig {
            compose: default_compose(),
            templates: None,
            defaults: OptionSet::new(),
        }
    }
}

impl ComposeConfig {
    /// Load from `path`.
    ///
    /// Returns `ConfigError::NotFound` if absent, `ConfigError::Parse` (with
    /// path) if malformed. A relative `templates` entry is resolved against
    /// the config file's directory.
    pub fn load_at(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        let mut config: ComposeConfig =
            serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                source: e,
            })?;

        if let (Some(dir), Some(base)) = (config.templates.as_ref(), path.parent()) {
            if dir.is_relative() {
                config.templates = Some(base.join(dir));
            }
        }
        Ok(config)
    }

    /// First existing file among `candidates`, or the built-in defaults.
    pub fn discover(candidates: &[PathBuf]) -> Result<Self, ConfigError> {
        for path in candidates {
            if path.is_file() {
                tracing::debug!(path = %path.display(), "using config");
                return Self::load_at(path);
            }
        }
        Ok(Self::default())
    }

    /// Option set handed to [`wrap`](crate::binding::wrap): the defaults with
    /// `compose` set to this config's key.
    pub fn binding_options(&self) -> OptionSet {
        let mut options = self.defaults.clone();
        options.insert(COMPOSE_OPTION.to_string(), Value::String(self.compose.clone()));
        options
    }
}
