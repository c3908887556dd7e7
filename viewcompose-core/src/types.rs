//! Value types passed through a composition call.
//!
//! Option sets are plain JSON objects. They are treated as copy-on-write
//! values: every helper here returns a fresh map and never touches its input.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Option key naming the field that receives nested output.
pub const COMPOSE_OPTION: &str = "compose";

/// Composition key used when neither the options nor a binding name one.
pub const DEFAULT_COMPOSE_KEY: &str = "content";

/// A single set of render options: string keys to arbitrary values.
pub type OptionSet = Map<String, Value>;

// ---------------------------------------------------------------------------
// TemplateRef
// ---------------------------------------------------------------------------

/// Opaque template identifier, resolved only by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateRef(pub String);

impl TemplateRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for TemplateRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TemplateRef {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// OneOrMany
// ---------------------------------------------------------------------------

/// Tagged "single value or ordered sequence" argument.
///
/// The dispatch facade routes on this tag instead of inspecting values at
/// runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Normalise to a sequence; `One` becomes a one-element vector.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }

    pub fn is_many(&self) -> bool {
        matches!(self, OneOrMany::Many(_))
    }
}

impl From<TemplateRef> for OneOrMany<TemplateRef> {
    fn from(t: TemplateRef) -> Self {
        OneOrMany::One(t)
    }
}

impl From<&str> for OneOrMany<TemplateRef> {
    fn from(s: &str) -> Self {
        OneOrMany::One(TemplateRef::from(s))
    }
}

impl From<Vec<TemplateRef>> for OneOrMany<TemplateRef> {
    fn from(v: Vec<TemplateRef>) -> Self {
        OneOrMany::Many(v)
    }
}

impl From<Vec<&str>> for OneOrMany<TemplateRef> {
    fn from(v: Vec<&str>) -> Self {
        OneOrMany::Many(v.into_iter().map(TemplateRef::from).collect())
    }
}

impl From<OptionSet> for OneOrMany<OptionSet> {
    fn from(o: OptionSet) -> Self {
        OneOrMany::One(o)
    }
}

impl From<Vec<OptionSet>> for OneOrMany<OptionSet> {
    fn from(v: Vec<OptionSet>) -> Self {
        OneOrMany::Many(v)
    }
}

// ---------------------------------------------------------------------------
// Option-set helpers
// ---------------------------------------------------------------------------

/// Composition key named by `options.compose`, or [`DEFAULT_COMPOSE_KEY`].
///
/// Non-string or empty values fall back to the default.
pub fn compose_key(options: &OptionSet) -> String {
    match options.get(COMPOSE_OPTION) {
        Some(Value::String(key)) if !key.is_empty() => key.clone(),
        _ => DEFAULT_COMPOSE_KEY.to_string(),
    }
}

/// Fresh option set with `overrides` laid over `defaults` (override wins).
pub fn merge_defaults(defaults: &OptionSet, overrides: &OptionSet) -> OptionSet {
    let mut merged = defaults.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Copy of `options` with `key` set to `content`.
pub(crate) fn with_composed(options: &OptionSet, key: &str, content: String) -> OptionSet {
    let mut updated = options.clone();
    updated.insert(key.to_string(), Value::String(content));
    updated
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn opts(value: Value) -> OptionSet {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn template_ref_display() {
        assert_eq!(TemplateRef::from("user.tera").to_string(), "user.tera");
    }

    #[test]
    fn one_becomes_single_element_vec() {
        let one: OneOrMany<TemplateRef> = "user".into();
        assert!(!one.is_many());
        assert_eq!(one.into_vec(), vec![TemplateRef::from("user")]);
    }

    #[test]
    fn compose_key_defaults_to_content() {
        assert_eq!(compose_key(&opts(json!({ "name": "tobi" }))), "content");
        assert_eq!(compose_key(&opts(json!({ "compose": 3 }))), "content");
        assert_eq!(compose_key(&opts(json!({ "compose": "" }))), "content");
    }

    #[test]
    fn compose_key_reads_compose_option() {
        assert_eq!(compose_key(&opts(json!({ "compose": "customKey" }))), "customKey");
    }

    #[test]
    fn merge_defaults_prefers_overrides_and_leaves_inputs_alone() {
        let defaults = opts(json!({ "compose": "content", "title": "home" }));
        let call = opts(json!({ "title": "profile", "name": "tobi" }));
        let merged = merge_defaults(&defaults, &call);

        assert_eq!(merged, opts(json!({ "compose": "content", "title": "profile", "name": "tobi" })));
        assert_eq!(defaults, opts(json!({ "compose": "content", "title": "home" })));
        assert_eq!(call, opts(json!({ "title": "profile", "name": "tobi" })));
    }

    #[test]
    fn with_composed_copies() {
        let original = opts(json!({ "name": "tobi" }));
        let updated = with_composed(&original, "content", "<p>tobi</p>".to_string());
        assert_eq!(updated["content"], json!("<p>tobi</p>"));
        assert!(!original.contains_key("content"));
    }
}
