//! Error types for viewcompose-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from loading or rendering Tera templates.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Tera template engine error.
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// The requested template was never registered.
    #[error("template not found: {0}")]
    NotFound(String),

    /// Filesystem error while loading templates.
    #[error("template io error at {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
}
