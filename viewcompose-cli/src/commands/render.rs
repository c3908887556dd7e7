//! `viewcompose render` — dispatch on the shape of templates and options.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use viewcompose_core::{Completion, OneOrMany, TemplateRef};

use super::{load_options, Session};

/// Arguments for `viewcompose render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// One template, or several (the first is repeated, the rest decorate it).
    #[arg(required = true)]
    pub templates: Vec<String>,

    /// Options file holding one object or an array of objects (`-` for stdin).
    #[arg(long, short)]
    pub options: Option<PathBuf>,
}

impl RenderArgs {
    pub fn run(self, session: &Session) -> Result<String> {
        let options = load_options(self.options.as_deref())?;
        let mut templates: Vec<TemplateRef> =
            self.templates.into_iter().map(TemplateRef::from).collect();
        let templates = match templates.len() {
            1 => OneOrMany::One(templates.remove(0)),
            _ => OneOrMany::Many(templates),
        };
        let bound = session.binding();
        session.block_on(bound.render(templates, options, Completion::Deliver));
        session.finish()
    }
}
