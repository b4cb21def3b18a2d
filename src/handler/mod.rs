//! Request handler module
//!
//! Servlet-style handlers mounted at fixed paths. A handler works on a
//! [`RequestContext`], may touch the session, and produces its response by
//! forwarding to a view.

pub mod router;
pub mod test_constant;

use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::config::AppState;
use crate::error::DispatchError;
use crate::http;
use crate::session::Session;
use crate::view::ViewContext;

// Re-export main entry point
pub use router::handle_request;

pub type HandlerResult = Result<Response<Full<Bytes>>, DispatchError>;

/// A handler mounted at a path. Unimplemented methods answer 405.
pub trait Servlet: Send + Sync {
    fn do_get(&self, _req: &mut RequestContext<'_>) -> HandlerResult {
        Ok(http::build_405_response())
    }

    fn do_post(&self, _req: &mut RequestContext<'_>) -> HandlerResult {
        Ok(http::build_405_response())
    }
}

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub state: &'a AppState,
    session_id: Option<String>,
    session: Option<Arc<Session>>,
    new_session: bool,
}

impl<'a> RequestContext<'a> {
    pub const fn new(
        path: &'a str,
        is_head: bool,
        state: &'a AppState,
        session_id: Option<String>,
    ) -> Self {
        Self {
            path,
            is_head,
            state,
            session_id,
            session: None,
            new_session: false,
        }
    }

    /// Current session, created if the client has none
    pub fn session(&mut self) -> Arc<Session> {
        if let Some(session) = &self.session {
            return Arc::clone(session);
        }
        let (session, created) = self
            .state
            .sessions
            .get_or_create(self.session_id.as_deref());
        self.new_session = created;
        self.session = Some(Arc::clone(&session));
        session
    }

    /// Current session without creating one
    pub fn existing_session(&mut self) -> Option<Arc<Session>> {
        if self.session.is_none() {
            self.session = self
                .session_id
                .as_deref()
                .and_then(|id| self.state.sessions.find(id));
        }
        self.session.clone()
    }

    /// Id of a session created while handling this request
    pub fn created_session_id(&self) -> Option<&str> {
        self.session
            .as_deref()
            .filter(|_| self.new_session)
            .map(Session::id)
    }

    /// Hand the response over to a named view
    pub fn forward(&mut self, view: &str) -> HandlerResult {
        let session = self.existing_session();
        let ctx = ViewContext {
            path: self.path,
            constants: self.state.context.constants(),
            session: session.as_deref(),
        };
        self.state.views.forward(view, &ctx, self.is_head)
    }
}
