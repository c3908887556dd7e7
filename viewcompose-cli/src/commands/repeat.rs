//! `viewcompose repeat` — one template, many option sets.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use viewcompose_core::{Completion, TemplateRef};

use super::{load_options, Session};

/// Arguments for `viewcompose repeat`.
#[derive(Args, Debug)]
pub struct RepeatArgs {
    /// Template rendered once per option set.
    pub template: String,

    /// Options file holding one object or an array of objects (`-` for stdin).
    #[arg(long, short)]
    pub options: Option<PathBuf>,
}

impl RepeatArgs {
    pub fn run(self, session: &Session) -> Result<String> {
        let options = load_options(self.options.as_deref())?;
        let template = TemplateRef::from(self.template);
        let bound = session.binding();
        session.block_on(bound.repeat(&template, options, Completion::Deliver));
        session.finish()
    }
}
