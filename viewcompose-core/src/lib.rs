//! viewcompose core — repeat/decorate sequencing over an external view renderer.
//!
//! Public API surface:
//! - [`engine`] — [`repeat`], [`decorate`], [`render`]
//! - [`binding`] — [`wrap`] and [`Binding`]
//! - [`target`] — [`ViewRenderer`], [`OutputTarget`], [`Completion`], [`ViewResponse`]
//! - [`types`] — [`TemplateRef`], [`OptionSet`], [`OneOrMany`]
//! - [`config`] — [`ComposeConfig`]
//! - [`error`] — [`ComposeError`], [`ConfigError`]

pub mod binding;
pub mod config;
pub mod engine;
pub mod error;
pub mod target;
pub mod types;

pub use binding::{wrap, Binding};
pub use config::ComposeConfig;
pub use engine::{decorate, render, repeat};
pub use error::{BoxError, ComposeError, ConfigError};
pub use target::{Callback, Completion, OutputTarget, ViewRenderer, ViewResponse};
pub use types::{OneOrMany, OptionSet, TemplateRef, DEFAULT_COMPOSE_KEY};
