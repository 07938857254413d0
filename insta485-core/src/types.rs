//! Domain types for the site configuration.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.
//! All types deserialize from `config.json` via serde + serde_json.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::layout::PAGE_FILE;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Name of a template, relative to the `templates/` directory (`/`-separated).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct TemplateName(pub String);

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for TemplateName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TemplateName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl AsRef<str> for TemplateName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Route
// ---------------------------------------------------------------------------

/// One page of the site: which template to render, with what, and where.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Route {
    pub template: TemplateName,
    pub url: String,
    /// Passed to the template verbatim. Missing in the file means empty.
    #[serde(default)]
    pub context: Map<String, Value>,
}

impl Route {
    /// The URL with every leading `/` removed.
    ///
    /// `"/"` and `""` both normalize to the empty string (the site root).
    pub fn normalized_url(&self) -> &str {
        self.url.trim_start_matches('/')
    }

    /// `<output_dir>/<normalized url>/index.html`: pure, no I/O.
    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        let url = self.normalized_url();
        if url.is_empty() {
            output_dir.join(PAGE_FILE)
        } else {
            output_dir.join(url).join(PAGE_FILE)
        }
    }
}

// ---------------------------------------------------------------------------
// SiteConfig
// ---------------------------------------------------------------------------

/// The ordered list of routes loaded from `config.json`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(transparent)]
pub struct SiteConfig {
    pub routes: Vec<Route>,
}

impl SiteConfig {
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }

    /// Normalized URLs that appear more than once, in first-repeat order.
    ///
    /// Later routes overwrite earlier ones at render time; this only reports.
    pub fn duplicate_urls(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut dups = Vec::new();
        for route in &self.routes {
            let url = route.normalized_url();
            if !seen.insert(url) && !dups.iter().any(|d: &String| d == url) {
                dups.push(url.to_string());
            }
        }
        dups
    }
}

impl<'a> IntoIterator for &'a SiteConfig {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
