//! View layer
//!
//! Handlers never write response bodies themselves: they forward to a named
//! [`View`], which sees the published constants, the current session and the
//! request path.

mod test_constant;

use std::collections::HashMap;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use serde_json::Value;

use crate::context::ConstantStore;
use crate::error::{DispatchError, ViewError};
use crate::http;
use crate::session::Session;

pub use test_constant::{TestConstantView, TEST_CONSTANT_VIEW};

/// Everything a view may read
pub struct ViewContext<'a> {
    pub path: &'a str,
    pub constants: Option<&'a ConstantStore>,
    pub session: Option<&'a Session>,
}

impl ViewContext<'_> {
    /// Resolve `Class.FIELD` against the published constants
    pub fn resolve_constant(&self, expression: &str) -> Result<&Value, ViewError> {
        self.constants
            .and_then(|store| store.lookup(expression))
            .ok_or_else(|| ViewError::Missing(expression.to_string()))
    }

    /// Session attribute whose key is the constant `Class.FIELD`.
    /// An unpublished constant reads as no value.
    pub fn session_attribute_by_constant(&self, expression: &str) -> Option<Value> {
        let key = match self.resolve_constant(expression).ok()? {
            Value::String(key) => key.clone(),
            other => other.to_string(),
        };
        self.session?.attribute(&key)
    }
}

/// A renderable page
pub trait View: Send + Sync {
    fn render(&self, ctx: &ViewContext<'_>) -> Result<String, ViewError>;
}

/// Views addressable by name
#[derive(Default, Clone)]
pub struct ViewRegistry {
    views: HashMap<String, Arc<dyn View>>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the application's own views
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(TEST_CONSTANT_VIEW, TestConstantView);
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, view: impl View + 'static) {
        self.views.insert(name.into(), Arc::new(view));
    }

    /// Render `name` into an HTML response
    pub fn forward(
        &self,
        name: &str,
        ctx: &ViewContext<'_>,
        is_head: bool,
    ) -> Result<Response<Full<Bytes>>, DispatchError> {
        let view = self
            .views
            .get(name)
            .ok_or_else(|| DispatchError::ViewNotFound(name.to_string()))?;
        let html = view.render(ctx).map_err(|source| DispatchError::Render {
            name: name.to_string(),
            source,
        })?;
        Ok(http::build_html_response(html, is_head))
    }
}

impl std::fmt::Debug for ViewRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewRegistry")
            .field("views", &self.views.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Escape text for inclusion in HTML
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
