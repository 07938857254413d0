//! Error types for insta485-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while loading `config.json`.
///
/// The `Display` output is the diagnostic shown after the program prefix:
/// the quoted path on the first line, the detail (if any) on the second.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file did not exist at the expected path.
    #[error("'{}' not found", .path.display())]
    NotFound { path: PathBuf },

    /// JSON parse error: includes line/column context from serde_json.
    #[error("'{}'\n{source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The file exists but could not be read.
    #[error("'{}'\n{source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
