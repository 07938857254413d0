//! Error types for insta485-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from template loading and rendering.
///
/// `Display` is the quoted path or template name, then the engine detail
/// on following lines where there is one.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The `templates/` directory is missing or not a directory.
    #[error("'{}' not found", .path.display())]
    TemplatesNotFound { path: PathBuf },

    /// A route names a template that is not under `templates/`.
    #[error("'{name}' not found")]
    TemplateNotFound { name: String },

    /// A template failed to parse.
    #[error("'{name}'\n{}", error_detail(.source))]
    Syntax { name: String, source: tera::Error },

    /// A template parsed but failed to render (e.g. undefined variable).
    #[error("'{name}'\n{}", error_detail(.source))]
    Render { name: String, source: tera::Error },

    /// Templates could not be registered and no single file is to blame.
    #[error("'{}'\n{}", .path.display(), error_detail(.source))]
    Engine { path: PathBuf, source: tera::Error },

    /// Filesystem error while loading templates.
    #[error("'{}'\n{source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },
}

/// Tera wraps the useful message (line, column, missing variable) in its
/// source chain; flatten the chain into one line per cause.
pub fn error_detail(err: &tera::Error) -> String {
    let mut lines = vec![err.to_string()];
    let mut cause = std::error::Error::source(err);
    while let Some(inner) = cause {
        lines.push(inner.to_string());
        cause = inner.source();
    }
    lines.join("\n")
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io {
        path: path.into(),
        source,
    }
}
