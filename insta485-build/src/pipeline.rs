//! Site build entrypoint used by the CLI.
//!
//! Control flows strictly: load config → build template engine → render
//! every route in order → copy `static/`. The first error aborts the run;
//! pages already written stay on disk.

use std::path::PathBuf;

use insta485_core::{config, SiteLayout, TemplateName};
use insta485_renderer::TemplateEngine;

use crate::error::BuildError;
use crate::static_files::{copy_static, StaticCopy};
use crate::writer::{write_page, RenderedPage};

/// Inputs for one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Directory holding `config.json`, `templates/` and optionally `static/`.
    pub input_dir: PathBuf,
    /// Output directory; `<input_dir>/html` when `None`.
    pub output_dir: Option<PathBuf>,
}

impl BuildOptions {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        BuildOptions {
            input_dir: input_dir.into(),
            output_dir: None,
        }
    }

    pub fn layout(&self) -> SiteLayout {
        SiteLayout::new(self.input_dir.clone(), self.output_dir.clone())
    }
}

/// Progress notifications, delivered as each step completes.
#[derive(Debug, Clone, Copy)]
pub enum BuildEvent<'a> {
    PageRendered(&'a RenderedPage),
    StaticCopied(&'a StaticCopy),
}

/// Everything a successful build produced.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// One entry per route, in config order (duplicate URLs included).
    pub pages: Vec<RenderedPage>,
    /// `None` when the input has no `static/` directory.
    pub static_copy: Option<StaticCopy>,
}

/// Run a build without progress reporting.
pub fn run(options: &BuildOptions) -> Result<BuildReport, BuildError> {
    run_with(options, |_| {})
}

/// Run a build, calling `on_event` after each page and after the static copy.
pub fn run_with<F>(options: &BuildOptions, mut on_event: F) -> Result<BuildReport, BuildError>
where
    F: FnMut(BuildEvent<'_>),
{
    let layout = options.layout();

    let site = config::load(&layout.config_file())?;
    let entry_points: Vec<TemplateName> = site.iter().map(|r| r.template.clone()).collect();
    let engine = TemplateEngine::new(&layout.templates_dir(), &entry_points)?;

    for url in site.duplicate_urls() {
        tracing::debug!(url = %url, "duplicate url; last route wins");
    }

    let mut report = BuildReport::default();
    for route in &site {
        let page = write_page(&engine, route, layout.output_dir())?;
        on_event(BuildEvent::PageRendered(&page));
        report.pages.push(page);
    }

    report.static_copy = copy_static(&layout.static_dir(), layout.output_dir())?;
    if let Some(copy) = &report.static_copy {
        on_event(BuildEvent::StaticCopied(copy));
    }

    tracing::info!(
        pages = report.pages.len(),
        static_files = report.static_copy.as_ref().map_or(0, |c| c.files.len()),
        output = %layout.output_dir().display(),
        "site built"
    );
    Ok(report)
}
