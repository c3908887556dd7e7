//! # viewcompose-renderer
//!
//! Tera-based [`ViewRenderer`](viewcompose_core::ViewRenderer) for the
//! viewcompose engines.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use viewcompose_core::{decorate, Completion, OptionSet, ViewResponse};
//! use viewcompose_renderer::TeraRenderer;
//!
//! async fn page(options: OptionSet) -> Option<String> {
//!     let renderer = TeraRenderer::from_dir(Path::new("views")).ok()?;
//!     let res = ViewResponse::new(renderer);
//!     decorate(&res, vec!["user.tera", "layout.tera"], options, Completion::Deliver).await;
//!     res.take_outcome()?.ok()
//! }
//! ```

pub mod engine;
pub mod error;

pub use engine::TeraRenderer;
pub use error::RenderError;
