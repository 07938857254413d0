//! Error types for insta485-build.

use std::path::PathBuf;

use thiserror::Error;

use insta485_core::ConfigError;
use insta485_renderer::RenderError;

/// All errors that can abort a site build.
///
/// Every variant displays as the quoted path or template name followed by
/// an optional detail line, ready for the CLI's program prefix.
#[derive(Debug, Error)]
pub enum BuildError {
    /// `config.json` missing or malformed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Templates directory missing, or a template failed to parse or render.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// An I/O error while writing output, with annotated path for context.
    #[error("'{}'\n{source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`BuildError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> BuildError {
    BuildError::Io {
        path: path.into(),
        source,
    }
}
