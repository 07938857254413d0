//! `config.json` loading.
//!
//! The file is a JSON array of route objects:
//!
//! ```json
//! [
//!   { "template": "index.html", "url": "/", "context": { "title": "Home" } }
//! ]
//! ```
//!
//! # API pattern
//!
//! - `load(path)`: parse one explicit file
//! - `load_at(input_dir)`: resolves `<input_dir>/config.json`, delegates to `load`

use std::io;
use std::path::Path;

use crate::error::ConfigError;
use crate::layout::CONFIG_FILE;
use crate::types::SiteConfig;

/// Load and parse the route list at `path`.
///
/// Returns `ConfigError::NotFound` if absent,
/// `ConfigError::Parse` (with path + line context) if malformed JSON.
pub fn load(path: &Path) -> Result<SiteConfig, ConfigError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            })
        }
        Err(err) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source: err,
            })
        }
    };
    serde_json::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load `<input_dir>/config.json`.
pub fn load_at(input_dir: &Path) -> Result<SiteConfig, ConfigError> {
    load(&input_dir.join(CONFIG_FILE))
}
