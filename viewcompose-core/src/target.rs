//! Collaborator contracts and completion routing.
//!
//! The core only sequences calls. Rendering is delegated to a
//! [`ViewRenderer`], and the terminal write goes to an [`OutputTarget`].
//! [`ViewResponse`] is a ready-made target that buffers the outcome.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{BoxError, ComposeError};
use crate::types::{OptionSet, TemplateRef};

/// Renders one template with one option set.
///
/// Implementations must resolve exactly once per call. The core passes the
/// exact option set it prepared and forwards any error unmodified.
#[async_trait]
pub trait ViewRenderer: Send + Sync {
    async fn render(&self, template: &TemplateRef, options: &OptionSet) -> Result<String, BoxError>;
}

/// A response that can render views and accepts one terminal outcome.
///
/// A target is single-use per composition call. Running two compositions
/// concurrently against the same target is undefined behaviour; targets
/// should keep the first outcome rather than interleave writes.
pub trait OutputTarget: ViewRenderer {
    /// Terminal successful write.
    fn send_final(&self, body: String);

    /// Upstream error sink for failures with no callback to receive them.
    fn report_error(&self, error: ComposeError);
}

/// Boxed completion callback.
pub type Callback<'a> = Box<dyn FnOnce(Result<String, ComposeError>) + Send + 'a>;

/// Who receives the outcome of a composition call.
///
/// Decided once at call entry. [`Completion::settle`] is the only place the
/// terminal write happens.
pub enum Completion<'a> {
    /// Hand the outcome to the caller; the caller owns delivery.
    Callback(Callback<'a>),
    /// Deliver straight to the output target.
    Deliver,
}

impl<'a> Completion<'a> {
    pub fn callback<F>(f: F) -> Self
    where
        F: FnOnce(Result<String, ComposeError>) + Send + 'a,
    {
        Completion::Callback(Box::new(f))
    }

    /// Route `outcome` to its single owner.
    pub fn settle<T: OutputTarget + ?Sized>(self, target: &T, outcome: Result<String, ComposeError>) {
        match self {
            Completion::Callback(f) => f(outcome),
            Completion::Deliver => match outcome {
                Ok(body) => {
                    tracing::info!(bytes = body.len(), "delivering composed view");
                    target.send_final(body);
                }
                Err(err) => {
                    tracing::debug!(error = %err, "reporting failure upstream");
                    target.report_error(err);
                }
            },
        }
    }
}

impl std::fmt::Debug for Completion<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Completion::Callback(_) => f.write_str("Completion::Callback"),
            Completion::Deliver => f.write_str("Completion::Deliver"),
        }
    }
}

// ---------------------------------------------------------------------------
// ViewResponse
// ---------------------------------------------------------------------------

/// Buffering [`OutputTarget`] around any [`ViewRenderer`].
///
/// Keeps the first terminal outcome; later writes are logged and dropped.
pub struct ViewResponse<R> {
    renderer: R,
    outcome: Mutex<Option<Result<String, ComposeError>>>,
}

impl<R: ViewRenderer> ViewResponse<R> {
    pub fn new(renderer: R) -> Self {
        ViewResponse {
            renderer,
            outcome: Mutex::new(None),
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Take the buffered outcome, leaving the response empty.
    pub fn take_outcome(&self) -> Option<Result<String, ComposeError>> {
        self.lock().take()
    }

    fn store(&self, outcome: Result<String, ComposeError>) {
        let mut slot = self.lock();
        if slot.is_some() {
            tracing::warn!("response already has a terminal outcome; dropping second write");
            return;
        }
        *slot = Some(outcome);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Result<String, ComposeError>>> {
        // A poisoned slot still holds a valid Option.
        self.outcome.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl<R: ViewRenderer> ViewRenderer for ViewResponse<R> {
    async fn render(&self, template: &TemplateRef, options: &OptionSet) -> Result<String, BoxError> {
        self.renderer.render(template, options).await
    }
}

impl<R: ViewRenderer> OutputTarget for ViewResponse<R> {
    fn send_final(&self, body: String) {
        self.store(Ok(body));
    }

    fn report_error(&self, error: ComposeError) {
        self.store(Err(error));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct Echo;

    #[async_trait]
    impl ViewRenderer for Echo {
        async fn render(&self, template: &TemplateRef, _options: &OptionSet) -> Result<String, BoxError> {
            Ok(template.to_string())
        }
    }

    fn failure() -> ComposeError {
        ComposeError::render(&TemplateRef::from("broken"), "boom".into())
    }

    #[test]
    fn deliver_sends_to_target() {
        let res = ViewResponse::new(Echo);
        Completion::Deliver.settle(&res, Ok("<p>hi</p>".to_string()));
        assert_eq!(res.take_outcome().unwrap().unwrap(), "<p>hi</p>");
        assert!(res.take_outcome().is_none());
    }

    #[test]
    fn deliver_reports_errors_upstream() {
        let res = ViewResponse::new(Echo);
        Completion::Deliver.settle(&res, Err(failure()));
        let err = res.take_outcome().unwrap().unwrap_err();
        assert_eq!(err.template().as_str(), "broken");
    }

    #[test]
    fn callback_receives_outcome_and_target_stays_empty() {
        let res = ViewResponse::new(Echo);
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        Completion::callback(move |outcome| {
            *sink.lock().unwrap() = Some(outcome.unwrap());
        })
        .settle(&res, Ok("body".to_string()));

        assert_eq!(seen.lock().unwrap().as_deref(), Some("body"));
        assert!(res.take_outcome().is_none());
    }

    #[test]
    fn second_terminal_write_is_dropped() {
        let res = ViewResponse::new(Echo);
        res.send_final("first".to_string());
        res.report_error(failure());
        assert_eq!(res.take_outcome().unwrap().unwrap(), "first");
    }

    #[test]
    fn response_delegates_rendering() {
        let res = ViewResponse::new(Echo);
        let out = tokio_test::block_on(res.render(&TemplateRef::from("user"), &OptionSet::new()));
        assert_eq!(out.unwrap(), "user");
    }
}
