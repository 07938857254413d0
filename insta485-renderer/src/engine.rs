//! Tera environment bound to a site's `templates/` directory.
//!
//! # Template names
//!
//! | File on disk                          | Template name        |
//! |---------------------------------------|----------------------|
//! | `templates/index.html`                | `index.html`         |
//! | `templates/partials/nav.html`         | `partials/nav.html`  |
//! | `templates/feed.xml`                  | `feed.xml`           |
//!
//! Names ending in `.html` or `.xml` (any case) are auto-escaped; everything
//! else is rendered verbatim.
//!
//! # Broken templates
//!
//! A template that fails to parse only aborts the build when one of the
//! engine's entry points reaches it through `extends`, `include` or
//! `import`. Unreachable broken templates are dropped with a debug log, as
//! are files that are not UTF-8 text.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use tera::Tera;

use insta485_core::types::TemplateName;

use crate::context::PageContext;
use crate::error::{io_err, RenderError};

/// Suffixes that turn on auto-escaping, in every casing.
///
/// Tera compares suffixes case-sensitively.
pub const AUTOESCAPE_SUFFIXES: &[&str] = &[
    ".html", ".htmL", ".htMl", ".htML", ".hTml", ".hTmL", ".hTMl", ".hTML",
    ".Html", ".HtmL", ".HtMl", ".HtML", ".HTml", ".HTmL", ".HTMl", ".HTML",
    ".xml", ".xmL", ".xMl", ".xML", ".Xml", ".XmL", ".XMl", ".XML",
];

// ---------------------------------------------------------------------------
// Escaping
// ---------------------------------------------------------------------------

/// HTML escaping for `& < > " '`.
///
/// Tera's built-in escaper also rewrites `/`, which mangles every URL placed
/// in an attribute; this one leaves it alone.
pub fn escape_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

fn normalize_template_name(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn collect_template_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), RenderError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let meta = std::fs::metadata(&path).map_err(|e| io_err(&path, e))?;
        if meta.is_dir() {
            collect_template_files(&path, out)?;
        } else if meta.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

/// Name → source for every UTF-8 file under `dir`.
fn load_templates(dir: &Path) -> Result<BTreeMap<String, String>, RenderError> {
    let mut files = Vec::new();
    collect_template_files(dir, &mut files)?;
    let mut templates = BTreeMap::new();
    for path in files {
        let rel = path.strip_prefix(dir).unwrap_or(path.as_path());
        let name = normalize_template_name(rel);
        let bytes = std::fs::read(&path).map_err(|e| io_err(&path, e))?;
        match String::from_utf8(bytes) {
            Ok(contents) => {
                templates.insert(name, contents);
            }
            Err(_) => tracing::debug!(path = %path.display(), "skipping non-UTF-8 file"),
        }
    }
    Ok(templates)
}

/// Quoted string literals inside one `{% ... %}` tag body.
fn quoted_strings(tag: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut rest = tag;
    while let Some(open) = rest.find(|c: char| matches!(c, '"' | '\'' | '`')) {
        let quote = &rest[open..open + 1];
        let body = &rest[open + 1..];
        let Some(close) = body.find(quote) else { break };
        out.push(&body[..close]);
        rest = &body[close + 1..];
    }
    out
}

/// Template names a source pulls in via `extends`, `include` or `import`.
///
/// A plain scan, so it also works on sources Tera cannot parse.
fn referenced_templates(source: &str) -> Vec<&str> {
    let mut refs = Vec::new();
    let mut rest = source;
    while let Some(start) = rest.find("{%") {
        let after = &rest[start + 2..];
        let end = after.find("%}").unwrap_or(after.len());
        let tag = after[..end].trim_start_matches('-').trim_start();
        if ["extends", "include", "import"].iter().any(|kw| tag.starts_with(*kw)) {
            refs.extend(quoted_strings(tag));
        }
        rest = &after[end..];
    }
    refs
}

/// Every template reachable from `entry_points`, entry points included.
fn reachable<'a>(
    templates: &'a BTreeMap<String, String>,
    entry_points: &'a [TemplateName],
) -> BTreeSet<&'a str> {
    let mut seen = BTreeSet::new();
    let mut stack: Vec<&str> = entry_points.iter().map(|name| name.0.as_str()).collect();
    while let Some(name) = stack.pop() {
        let Some((name, source)) = templates.get_key_value(name) else {
            continue;
        };
        if seen.insert(name.as_str()) {
            stack.extend(referenced_templates(source));
        }
    }
    seen
}

/// Find the template responsible for a failed registration.
///
/// Each candidate is registered alongside empty stand-ins for every other
/// name, so `extends`/`import` targets resolve and only the candidate's own
/// source can fail.
fn locate_failure(templates: &BTreeMap<String, String>) -> Option<(String, tera::Error)> {
    for (name, content) in templates {
        let mut probe = Tera::default();
        let items: Vec<(&str, &str)> = templates
            .keys()
            .filter(|other| *other != name)
            .map(|other| (other.as_str(), ""))
            .chain(std::iter::once((name.as_str(), content.as_str())))
            .collect();
        if let Err(err) = probe.add_raw_templates(items) {
            return Some((name.clone(), err));
        }
    }
    None
}

fn build_tera(templates_dir: &Path, entry_points: &[TemplateName]) -> Result<Tera, RenderError> {
    if !templates_dir.is_dir() {
        return Err(RenderError::TemplatesNotFound {
            path: templates_dir.to_path_buf(),
        });
    }
    let mut templates = load_templates(templates_dir)?;

    loop {
        let mut tera = Tera::default();
        tera.autoescape_on(AUTOESCAPE_SUFFIXES.to_vec());
        tera.set_escape_fn(escape_markup);
        let err = match tera.add_raw_templates(templates.iter()) {
            Ok(()) => {
                tracing::debug!(
                    dir = %templates_dir.display(),
                    count = templates.len(),
                    "templates loaded"
                );
                return Ok(tera);
            }
            Err(err) => err,
        };

        let Some((name, source)) = locate_failure(&templates) else {
            return Err(RenderError::Engine {
                path: templates_dir.to_path_buf(),
                source: err,
            });
        };
        if reachable(&templates, entry_points).contains(name.as_str()) {
            return Err(RenderError::Syntax { name, source });
        }
        tracing::debug!(template = %name, "skipping unused template that does not parse");
        templates.remove(&name);
    }
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Tera-based engine for rendering the templates of one site.
///
/// Create once with [`TemplateEngine::new`] and reuse for every route.
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Construct a new [`TemplateEngine`] over `templates_dir`.
    ///
    /// `entry_points` are the templates the site renders directly. Fails
    /// with [`RenderError::TemplatesNotFound`] when the directory is missing
    /// and [`RenderError::Syntax`] naming the first template reachable from
    /// an entry point that does not parse.
    pub fn new(templates_dir: &Path, entry_points: &[TemplateName]) -> Result<Self, RenderError> {
        let tera = build_tera(templates_dir, entry_points)?;
        Ok(TemplateEngine { tera })
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    /// Render `name` against `ctx`.
    pub fn render(&self, name: &TemplateName, ctx: &PageContext) -> Result<String, RenderError> {
        if !self.has_template(name.as_ref()) {
            return Err(RenderError::TemplateNotFound {
                name: name.0.clone(),
            });
        }
        self.tera
            .render(name.as_ref(), &ctx.to_tera_context())
            .map_err(|source| RenderError::Render {
                name: name.0.clone(),
                source,
            })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn names(list: &[&str]) -> Vec<TemplateName> {
        list.iter().map(|n| TemplateName::from(*n)).collect()
    }

    #[test]
    fn escape_markup_leaves_slashes() {
        assert_eq!(escape_markup("/uploads/a.jpg"), "/uploads/a.jpg");
        assert_eq!(
            escape_markup(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&#34;x&#34;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn autoescape_suffixes_cover_every_casing() {
        for ext in ["html", "xml"] {
            let variants = AUTOESCAPE_SUFFIXES
                .iter()
                .filter(|s| s[1..].eq_ignore_ascii_case(ext))
                .collect::<BTreeSet<_>>();
            assert_eq!(variants.len(), 1 << ext.len(), "{ext}");
        }
    }

    #[test]
    fn nested_templates_use_forward_slash_names() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "index.html", "home");
        write(tmp.path(), "partials/nav.html", "nav");
        let engine = TemplateEngine::new(tmp.path(), &[]).unwrap();
        assert!(engine.has_template("index.html"));
        assert!(engine.has_template("partials/nav.html"));
        assert!(!engine.has_template("nav.html"));
    }

    #[test]
    fn empty_directory_is_valid() {
        let tmp = TempDir::new().unwrap();
        let engine = TemplateEngine::new(tmp.path(), &names(&["index.html"])).unwrap();
        assert!(!engine.has_template("index.html"));
    }

    #[test]
    fn missing_directory_is_templates_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = TemplateEngine::new(&tmp.path().join("templates"), &[])
            .err()
            .unwrap();
        assert!(matches!(err, RenderError::TemplatesNotFound { .. }), "got: {err}");
    }

    #[test]
    fn broken_child_is_blamed_not_its_parent() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "base.html", "<main>{% block body %}{% endblock %}</main>");
        write(
            tmp.path(),
            "page.html",
            "{% extends \"base.html\" %}{% block body %}{{ title {% endblock %}",
        );
        let err = TemplateEngine::new(tmp.path(), &names(&["page.html"]))
            .err()
            .unwrap();
        match err {
            RenderError::Syntax { name, .. } => assert_eq!(name, "page.html"),
            other => panic!("expected syntax error, got: {other}"),
        }
    }

    #[test]
    fn broken_template_reached_through_include_is_fatal() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "index.html", "{% include 'partials/nav.html' %}");
        write(tmp.path(), "partials/nav.html", "{% if %}");
        let err = TemplateEngine::new(tmp.path(), &names(&["index.html"]))
            .err()
            .unwrap();
        match err {
            RenderError::Syntax { name, .. } => assert_eq!(name, "partials/nav.html"),
            other => panic!("expected syntax error, got: {other}"),
        }
    }

    #[test]
    fn unreachable_broken_template_is_dropped() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "index.html", "home");
        write(tmp.path(), "draft.html", "{% if %}");
        write(tmp.path(), "draft_child.html", "{% extends \"draft.html\" %}");
        let engine = TemplateEngine::new(tmp.path(), &names(&["index.html"])).unwrap();
        assert!(engine.has_template("index.html"));
        assert!(!engine.has_template("draft.html"));
        assert!(!engine.has_template("draft_child.html"));
    }

    #[test]
    fn non_utf8_files_are_skipped() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "index.html", "home");
        fs::write(tmp.path().join(".DS_Store"), [0x00, 0xff, 0xfe, 0x80]).unwrap();
        let engine = TemplateEngine::new(tmp.path(), &names(&["index.html"])).unwrap();
        assert!(engine.has_template("index.html"));
        assert!(!engine.has_template(".DS_Store"));
    }

    #[test]
    fn references_are_read_from_tag_bodies() {
        let source = r#"{% extends "base.html" %}{%- include ['a.html', "b.html"] ignore missing -%}
{% import `macros.html` as m %}{{ "not.html" }}{% if x %}"also_not.html"{% endif %}"#;
        assert_eq!(
            referenced_templates(source),
            vec!["base.html", "a.html", "b.html", "macros.html"]
        );
    }
}
