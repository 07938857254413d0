//! Input / output directory layout of one generator run.
//!
//! ```text
//! <input_dir>/
//!   config.json      (required)
//!   templates/       (required)
//!   static/          (optional, copied verbatim)
//!   html/            (default output directory)
//! ```

use std::path::{Path, PathBuf};

/// Route list file name under the input directory.
pub const CONFIG_FILE: &str = "config.json";
/// Template directory name under the input directory.
pub const TEMPLATES_DIR: &str = "templates";
/// Static asset directory name under the input directory.
pub const STATIC_DIR: &str = "static";
/// Output directory used when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "html";
/// File written for every route.
pub const PAGE_FILE: &str = "index.html";

/// Resolved paths for a single run. Pure, no I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLayout {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl SiteLayout {
    /// `output_dir` defaults to `<input_dir>/html`.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: Option<PathBuf>) -> Self {
        let input_dir = input_dir.into();
        let output_dir = output_dir.unwrap_or_else(|| input_dir.join(DEFAULT_OUTPUT_DIR));
        SiteLayout {
            input_dir,
            output_dir,
        }
    }

    /// `<input_dir>/config.json`
    pub fn config_file(&self) -> PathBuf {
        self.input_dir.join(CONFIG_FILE)
    }

    /// `<input_dir>/templates/`
    pub fn templates_dir(&self) -> PathBuf {
        self.input_dir.join(TEMPLATES_DIR)
    }

    /// `<input_dir>/static/`
    pub fn static_dir(&self) -> PathBuf {
        self.input_dir.join(STATIC_DIR)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}
