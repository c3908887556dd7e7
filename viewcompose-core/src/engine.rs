//! Repeat and decorate engines plus the `render` dispatch facade.
//!
//! Every operation drains an explicit queue one element at a time, awaiting
//! each render before the next starts. Output order therefore always matches
//! input order, and the first failure stops the chain.
//!
//! | templates | options | route                          |
//! |-----------|---------|--------------------------------|
//! | `One`     | `Many`  | repeat                         |
//! | `Many`    | `Many`  | repeat head, decorate the tail |
//! | any       | `One`   | decorate                       |

use std::collections::VecDeque;

use serde_json::Value;

use crate::error::ComposeError;
use crate::target::{Completion, OutputTarget, ViewRenderer};
use crate::types::{
    compose_key, with_composed, OneOrMany, OptionSet, TemplateRef, DEFAULT_COMPOSE_KEY,
};

// ---------------------------------------------------------------------------
// Public operations
// ---------------------------------------------------------------------------

/// Render `template` once per option set and concatenate the results.
///
/// A single option set is treated as a one-element sequence; an empty
/// sequence yields `""` without calling the renderer.
pub async fn repeat<T>(
    target: &T,
    template: &TemplateRef,
    options: impl Into<OneOrMany<OptionSet>>,
    completion: Completion<'_>,
) where
    T: OutputTarget + ?Sized,
{
    let outcome = repeat_all(target, template, options.into().into_vec()).await;
    completion.settle(target, outcome);
}

/// Render `templates` innermost first, injecting each result into a copy of
/// `options` under the composition key before rendering the next one.
///
/// The key is read from `options.compose` once at entry (default `content`).
pub async fn decorate<T>(
    target: &T,
    templates: impl Into<OneOrMany<TemplateRef>>,
    options: OptionSet,
    completion: Completion<'_>,
) where
    T: OutputTarget + ?Sized,
{
    let key = compose_key(&options);
    let outcome = decorate_chain(target, templates.into().into_vec(), &options, &key).await;
    completion.settle(target, outcome);
}

/// Route to repeat, decorate, or repeat-then-decorate based on the shape of
/// `templates` and `options`.
pub async fn render<T>(
    target: &T,
    templates: impl Into<OneOrMany<TemplateRef>>,
    options: impl Into<OneOrMany<OptionSet>>,
    completion: Completion<'_>,
) where
    T: OutputTarget + ?Sized,
{
    let outcome = dispatch(target, templates.into(), options.into(), DEFAULT_COMPOSE_KEY).await;
    completion.settle(target, outcome);
}

// ---------------------------------------------------------------------------
// Engines
// ---------------------------------------------------------------------------

pub(crate) async fn repeat_all<R>(
    renderer: &R,
    template: &TemplateRef,
    options: Vec<OptionSet>,
) -> Result<String, ComposeError>
where
    R: ViewRenderer + ?Sized,
{
    let mut queue = VecDeque::from(options);
    let mut fragments = Vec::with_capacity(queue.len());
    while let Some(opts) = queue.pop_front() {
        tracing::debug!(template = %template, remaining = queue.len(), "repeat step");
        fragments.push(render_one(renderer, template, &opts).await?);
    }
    Ok(fragments.concat())
}

pub(crate) async fn decorate_chain<R>(
    renderer: &R,
    templates: Vec<TemplateRef>,
    options: &OptionSet,
    key: &str,
) -> Result<String, ComposeError>
where
    R: ViewRenderer + ?Sized,
{
    let mut queue = VecDeque::from(templates);
    let Some(innermost) = queue.pop_front() else {
        return Ok(composed_field(options, key));
    };

    let mut rendered = render_one(renderer, &innermost, options).await?;
    while let Some(template) = queue.pop_front() {
        tracing::debug!(template = %template, key, remaining = queue.len(), "decorate step");
        let updated = with_composed(options, key, rendered);
        rendered = render_one(renderer, &template, &updated).await?;
    }
    Ok(rendered)
}

/// `many_key` names the injected field when a template sequence meets an
/// option sequence; single option sets carry their own key.
pub(crate) async fn dispatch<R>(
    renderer: &R,
    templates: OneOrMany<TemplateRef>,
    options: OneOrMany<OptionSet>,
    many_key: &str,
) -> Result<String, ComposeError>
where
    R: ViewRenderer + ?Sized,
{
    match (templates, options) {
        (OneOrMany::Many(templates), OneOrMany::Many(options)) => {
            let mut templates = VecDeque::from(templates);
            let Some(head) = templates.pop_front() else {
                return Ok(String::new());
            };
            let repeated = repeat_all(renderer, &head, options).await?;
            let wrapper = with_composed(&OptionSet::new(), many_key, repeated);
            decorate_chain(renderer, templates.into(), &wrapper, many_key).await
        }
        (OneOrMany::One(template), OneOrMany::Many(options)) => {
            repeat_all(renderer, &template, options).await
        }
        (templates, OneOrMany::One(options)) => {
            let key = compose_key(&options);
            decorate_chain(renderer, templates.into_vec(), &options, &key).await
        }
    }
}

async fn render_one<R>(
    renderer: &R,
    template: &TemplateRef,
    options: &OptionSet,
) -> Result<String, ComposeError>
where
    R: ViewRenderer + ?Sized,
{
    renderer.render(template, options).await.map_err(|source| {
        tracing::debug!(template = %template, error = %source, "render failed");
        ComposeError::render(template, source)
    })
}

/// Result of decorating with no templates: whatever content is already there.
fn composed_field(options: &OptionSet, key: &str) -> String {
    match options.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
