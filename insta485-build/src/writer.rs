//! Page writer.
//!
//! ## `write_page`: 3-step protocol
//!
//! 1. Create the parent directory chain.
//! 2. Write to `<path>.insta485.tmp`.
//! 3. Rename to final path (atomic on POSIX).

use std::path::{Path, PathBuf};

use insta485_core::types::{Route, TemplateName};
use insta485_renderer::{PageContext, TemplateEngine};

use crate::error::{io_err, BuildError};

// ---------------------------------------------------------------------------
// Rendered page
// ---------------------------------------------------------------------------

/// One `index.html` written for a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub template: TemplateName,
    pub url: String,
    pub path: PathBuf,
}

// ---------------------------------------------------------------------------
// atomic_write
// ---------------------------------------------------------------------------

/// Atomically replace `path` with `content`, creating parent directories.
pub(crate) fn atomic_write(path: &Path, content: &str) -> Result<(), BuildError> {
    let tmp = PathBuf::from(format!("{}.insta485.tmp", path.display()));
    atomic_write_with_tmp(path, content, &tmp)
}

fn atomic_write_with_tmp(path: &Path, content: &str, tmp: &Path) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }

    if let Some(tmp_parent) = tmp.parent() {
        std::fs::create_dir_all(tmp_parent).map_err(|e| io_err(tmp_parent, e))?;
    }
    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// write_page
// ---------------------------------------------------------------------------

/// Render `route` with `engine` and write it under `output_dir`.
///
/// A render failure returns before anything is written for this route.
pub fn write_page(
    engine: &TemplateEngine,
    route: &Route,
    output_dir: &Path,
) -> Result<RenderedPage, BuildError> {
    let html = engine.render(&route.template, &PageContext::from_route(route))?;
    let path = route.output_path(output_dir);
    atomic_write(&path, &html)?;

    tracing::debug!(template = %route.template, path = %path.display(), "wrote page");
    Ok(RenderedPage {
        template: route.template.clone(),
        url: route.url.clone(),
        path,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
