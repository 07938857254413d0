//! Page context: the per-route rendering payload.

use serde_json::{Map, Value};

use insta485_core::types::Route;

/// A route's `context` object, ready for Tera.
///
/// Top-level keys become template variables; nested values keep their JSON
/// shape so templates can index and loop over them.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    values: Map<String, Value>,
}

impl PageContext {
    /// Build a [`PageContext`] from a route's context object.
    pub fn from_route(route: &Route) -> Self {
        PageContext {
            values: route.context.clone(),
        }
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> tera::Context {
        let mut ctx = tera::Context::new();
        for (key, value) in &self.values {
            ctx.insert(key.as_str(), value);
        }
        ctx
    }
}
