//! Error types for viewcompose-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::TemplateRef;

/// Opaque error produced by a [`ViewRenderer`](crate::target::ViewRenderer).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure of a composition call.
///
/// The core never inspects the renderer's error; it is kept verbatim as
/// `source` alongside the template that failed.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// The renderer signalled a failure for `template`.
    #[error("failed to render template '{template}': {source}")]
    Render {
        template: TemplateRef,
        #[source]
        source: BoxError,
    },
}

impl ComposeError {
    pub(crate) fn render(template: &TemplateRef, source: BoxError) -> Self {
        ComposeError::Render {
            template: template.clone(),
            source,
        }
    }

    /// The template whose render call failed.
    pub fn template(&self) -> &TemplateRef {
        match self {
            ComposeError::Render { template, .. } => template,
        }
    }
}

/// All errors that can arise from loading a [`ComposeConfig`](crate::config::ComposeConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure other than a missing file.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file did not exist at the expected path.
    #[error("config not found at {path}")]
    NotFound { path: PathBuf },

    /// YAML parse error on load, with the file path for context.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
