//! Subcommands and the state they share.

pub mod decorate;
pub mod render;
pub mod repeat;

use std::future::Future;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde_json::Value;
use tokio::runtime::Runtime;
use viewcompose_core::{
    config::CONFIG_FILE_NAME, wrap, Binding, ComposeConfig, OneOrMany, OptionSet, ViewResponse,
};
use viewcompose_renderer::TeraRenderer;

use crate::GlobalArgs;

/// Template directory used when neither flag nor config names one.
const DEFAULT_TEMPLATE_DIR: &str = "views";

/// Loaded config, template set and runtime for one invocation.
pub struct Session {
    config: ComposeConfig,
    response: ViewResponse<TeraRenderer>,
    runtime: Runtime,
}

impl Session {
    pub fn open(global: &GlobalArgs) -> Result<Self> {
        let mut config = match &global.config {
            Some(path) => ComposeConfig::load_at(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => ComposeConfig::discover(&default_config_paths())
                .context("failed to load config")?,
        };
        if let Some(key) = &global.compose {
            config.compose = key.clone();
        }

        let dir = global
            .template_dir
            .clone()
            .or_else(|| config.templates.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_DIR));
        let renderer = TeraRenderer::from_dir(&dir)
            .with_context(|| format!("failed to load templates from {}", dir.display()))?;
        tracing::debug!(dir = %dir.display(), templates = ?renderer.template_names(), "loaded views");

        // Views render one at a time; a single thread is enough.
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to start tokio runtime")?;

        Ok(Session {
            config,
            response: ViewResponse::new(renderer),
            runtime,
        })
    }

    /// The response bound with the config's defaults and composition key.
    pub fn binding(&self) -> Binding<'_, ViewResponse<TeraRenderer>> {
        wrap(&self.response, Some(self.config.binding_options()))
    }

    pub fn block_on<F: Future<Output = ()>>(&self, fut: F) {
        self.runtime.block_on(fut);
    }

    /// The terminal outcome written to the response.
    pub fn finish(&self) -> Result<String> {
        match self.response.take_outcome() {
            Some(Ok(body)) => Ok(body),
            Some(Err(err)) => Err(anyhow::Error::new(err).context("composition failed")),
            None => bail!("composition finished without output"),
        }
    }
}

fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("viewcompose").join("config.yaml"));
    }
    paths
}

// ---------------------------------------------------------------------------
// Options files
// ---------------------------------------------------------------------------

/// Read an options file: `.json` as JSON, anything else as YAML, `-` from
/// stdin (YAML, which also accepts JSON). No file means one empty set.
pub fn load_options(path: Option<&Path>) -> Result<OneOrMany<OptionSet>> {
    let Some(path) = path else {
        return Ok(OneOrMany::One(OptionSet::new()));
    };

    let value: Value = if path == Path::new("-") {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read options from stdin")?;
        serde_yaml::from_str(&raw).context("failed to parse options from stdin")?
    } else {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read options {}", path.display()))?;
        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse options {}", path.display()))?
        } else {
            serde_yaml::from_str(&raw)
                .with_context(|| format!("failed to parse options {}", path.display()))?
        }
    };
    options_from_value(value)
}

fn options_from_value(value: Value) -> Result<OneOrMany<OptionSet>> {
    match value {
        Value::Object(map) => Ok(OneOrMany::One(map)),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(map) => Ok(map),
                other => bail!("options[{i}] must be an object, got {other}"),
            })
            .collect::<Result<Vec<_>>>()
            .map(OneOrMany::Many),
        other => bail!("options must be an object or an array of objects, got {other}"),
    }
}
