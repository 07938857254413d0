//! # insta485-renderer
//!
//! Tera-based template engine that renders site pages from the templates
//! directory of an insta485 input tree.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use insta485_core::config;
//! use insta485_renderer::{PageContext, TemplateEngine};
//!
//! fn render_all(input: &Path) {
//!     let Ok(config) = config::load_at(input) else { return };
//!     let entry_points: Vec<_> = config.iter().map(|r| r.template.clone()).collect();
//!     if let Ok(engine) = TemplateEngine::new(&input.join("templates"), &entry_points) {
//!         for route in &config {
//!             if let Ok(html) = engine.render(&route.template, &PageContext::from_route(route)) {
//!                 println!("{}: {} bytes", route.url, html.len());
//!             }
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::PageContext;
pub use engine::{escape_markup, TemplateEngine};
pub use error::RenderError;
