//! Target-bound composition.
//!
//! [`wrap`] captures an output target and a set of default options once, so
//! handlers can call `repeat` / `decorate` / `render` without threading the
//! target and module options through every call.

use serde_json::Value;

use crate::engine;
use crate::target::{Completion, OutputTarget};
use crate::types::{
    compose_key, merge_defaults, OneOrMany, OptionSet, TemplateRef, COMPOSE_OPTION,
    DEFAULT_COMPOSE_KEY,
};

/// Bind `target` with optional default options.
///
/// Defaults start as `{compose: "content"}` and are overlaid by `config`.
pub fn wrap<T>(target: &T, config: Option<OptionSet>) -> Binding<'_, T>
where
    T: OutputTarget + ?Sized,
{
    let mut defaults = OptionSet::new();
    defaults.insert(
        COMPOSE_OPTION.to_string(),
        Value::String(DEFAULT_COMPOSE_KEY.to_string()),
    );
    let defaults = match config {
        Some(config) => merge_defaults(&defaults, &config),
        None => defaults,
    };
    Binding { target, defaults }
}

/// A target plus default options. Created by [`wrap`].
pub struct Binding<'t, T: ?Sized> {
    target: &'t T,
    defaults: OptionSet,
}

impl<'t, T> Binding<'t, T>
where
    T: OutputTarget + ?Sized,
{
    pub fn target(&self) -> &'t T {
        self.target
    }

    pub fn defaults(&self) -> &OptionSet {
        &self.defaults
    }

    /// Composition key in effect for this binding.
    pub fn compose_key(&self) -> String {
        compose_key(&self.defaults)
    }

    /// Forward to [`engine::repeat`]; defaults are not applied.
    pub async fn repeat(
        &self,
        template: &TemplateRef,
        options: impl Into<OneOrMany<OptionSet>>,
        completion: Completion<'_>,
    ) {
        engine::repeat(self.target, template, options, completion).await;
    }

    /// Merge defaults beneath `options` and forward to [`engine::decorate`].
    pub async fn decorate(
        &self,
        templates: impl Into<OneOrMany<TemplateRef>>,
        options: &OptionSet,
        completion: Completion<'_>,
    ) {
        let merged = merge_defaults(&self.defaults, options);
        engine::decorate(self.target, templates, merged, completion).await;
    }

    /// Merge defaults and forward to the dispatch facade.
    ///
    /// A single option set gets the defaults merged into a fresh copy. An
    /// option sequence reaches the repeat stage unchanged, and the decorate
    /// stage uses this binding's composition key.
    pub async fn render(
        &self,
        templates: impl Into<OneOrMany<TemplateRef>>,
        options: impl Into<OneOrMany<OptionSet>>,
        completion: Completion<'_>,
    ) {
        let options = match options.into() {
            OneOrMany::One(opts) => OneOrMany::One(merge_defaults(&self.defaults, &opts)),
            many => many,
        };
        let key = self.compose_key();
        let outcome = engine::dispatch(self.target, templates.into(), options, &key).await;
        completion.settle(self.target, outcome);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
