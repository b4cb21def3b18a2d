// Application state module
// Everything request handling reads, built once at startup

use std::sync::Arc;

use super::types::Config;
use crate::context::WebContext;
use crate::session::SessionStore;
use crate::view::ViewRegistry;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Initialized before the listener binds; read-only afterwards
    pub context: Arc<WebContext>,
    pub sessions: SessionStore,
    pub views: ViewRegistry,
}

impl AppState {
    pub fn new(config: &Config, context: Arc<WebContext>, views: ViewRegistry) -> Self {
        Self {
            config: config.clone(),
            context,
            sessions: SessionStore::new(config.session.timeout_secs),
            views,
        }
    }
}
