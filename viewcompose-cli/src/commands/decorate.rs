//! `viewcompose decorate` — thread one rendering through outer templates.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use viewcompose_core::{Completion, OneOrMany, TemplateRef};

use super::{load_options, Session};

/// Arguments for `viewcompose decorate`.
#[derive(Args, Debug)]
pub struct DecorateArgs {
    /// Templates, innermost first.
    #[arg(required = true)]
    pub templates: Vec<String>,

    /// Options file holding one object (`-` for stdin).
    #[arg(long, short)]
    pub options: Option<PathBuf>,
}

impl DecorateArgs {
    pub fn run(self, session: &Session) -> Result<String> {
        let options = match load_options(self.options.as_deref())? {
            OneOrMany::One(options) => options,
            OneOrMany::Many(_) => bail!("decorate takes a single options object; use `render` for arrays"),
        };
        let templates: Vec<TemplateRef> = self.templates.into_iter().map(TemplateRef::from).collect();
        let bound = session.binding();
        session.block_on(bound.decorate(templates, &options, Completion::Deliver));
        session.finish()
    }
}
