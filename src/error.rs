//! Error types
//!
//! Registration-time errors are recovered where they occur (logged and skipped).
//! Request-time errors propagate to the router, which answers 500.

use thiserror::Error;

/// Application context lifecycle errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    #[error("application context already initialized")]
    AlreadyInitialized,
}

/// A declared field that cannot be read
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("illegal access of field [{class}->{field}]")]
pub struct FieldAccessError {
    pub class: String,
    pub field: String,
}

/// Constant catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read constant catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid constant catalog: {0}")]
    Parse(#[from] toml::de::Error),
}

/// View rendering errors
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("view requires missing value: {0}")]
    Missing(String),
    #[error("failed to render view: {0}")]
    Render(String),
}

/// Errors surfaced by request handlers to the hosting router
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no view registered under '{0}'")]
    ViewNotFound(String),
    #[error("view '{name}' failed: {source}")]
    Render {
        name: String,
        #[source]
        source: ViewError,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
