//! Tera-backed [`ViewRenderer`].
//!
//! Templates are registered either from a directory (every `*.tera` file,
//! recursively) or from raw `(name, source)` pairs. Names are relative paths
//! with `/` separators, lowercased, e.g. `layouts/page.html.tera`.
//!
//! Auto-escaping is off for every name: nested fragments are injected
//! verbatim whatever the template suffix.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tera::Tera;

use viewcompose_core::{BoxError, OptionSet, TemplateRef, ViewRenderer};

use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io { path: path.into(), source }
}

fn normalize_template_name(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/").to_lowercase()
}

/// Walks `dir` recursively, collecting `*.tera` files in sorted order.
fn collect_tera_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), RenderError> {
    let mut entries = std::fs::read_dir(dir)
        .map_err(|e| io_err(dir, e))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| io_err(dir, e))?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| io_err(&path, e))?;
        if file_type.is_dir() {
            collect_tera_files(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "tera") {
            out.push(path);
        }
    }
    Ok(())
}

fn read_views(dir: &Path) -> Result<Vec<(String, String)>, RenderError> {
    let mut files = Vec::new();
    collect_tera_files(dir, &mut files)?;

    files
        .into_iter()
        .map(|path| -> Result<(String, String), RenderError> {
            let name = normalize_template_name(path.strip_prefix(dir).unwrap_or(path.as_path()));
            let source = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
            tracing::debug!(template = %name, path = %path.display(), "loaded view");
            Ok((name, source))
        })
        .collect()
}

fn build_tera(items: Vec<(String, String)>) -> Result<Tera, RenderError> {
    // Later entries with the same normalised name win.
    let mut templates: HashMap<String, String> = HashMap::new();
    for (name, content) in items {
        templates.insert(normalize_template_name(Path::new(&name)), content);
    }

    let mut tera = Tera::default();
    // Composed fragments are already rendered markup; never escape them.
    tera.autoescape_on(vec![]);
    tera.add_raw_templates(templates.into_iter().collect::<Vec<_>>())?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// TeraRenderer
// ---------------------------------------------------------------------------

/// Renders named Tera templates with an [`OptionSet`] as the context.
///
/// Create once and share; rendering takes `&self`.
pub struct TeraRenderer {
    tera: Tera,
}

impl TeraRenderer {
    /// Load every `*.tera` file beneath `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self, RenderError> {
        let tera = build_tera(read_views(dir)?)?;
        Ok(TeraRenderer { tera })
    }

    /// Register in-memory `(name, source)` templates.
    pub fn from_raw<N, S>(items: impl IntoIterator<Item = (N, S)>) -> Result<Self, RenderError>
    where
        N: Into<String>,
        S: Into<String>,
    {
        let items = items
            .into_iter()
            .map(|(name, source)| (name.into(), source.into()))
            .collect();
        Ok(TeraRenderer { tera: build_tera(items)? })
    }

    /// Registered template names, sorted.
    pub fn template_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tera.get_template_names().map(str::to_owned).collect();
        names.sort();
        names
    }

    /// Render `template` synchronously.
    pub fn render_view(&self, template: &str, options: &OptionSet) -> Result<String, RenderError> {
        let name = normalize_template_name(Path::new(template));
        if !self.tera.get_template_names().any(|n| n == name) {
            return Err(RenderError::NotFound(template.to_string()));
        }
        let ctx = tera::Context::from_serialize(options)?;
        Ok(self.tera.render(&name, &ctx)?)
    }
}

#[async_trait]
impl ViewRenderer for TeraRenderer {
    async fn render(&self, template: &TemplateRef, options: &OptionSet) -> Result<String, BoxError> {
        self.render_view(template.as_str(), options)
            .map_err(BoxError::from)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
