//! Request dispatch module
//!
//! Entry point for HTTP request processing: method and body size checks,
//! servlet lookup by exact path, session cookie handling, and the 500 answer
//! for errors a handler propagates.

use std::convert::Infallible;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, COOKIE, SERVER, SET_COOKIE};
use hyper::{Method, Request, Response};

use super::test_constant::{TestConstantServlet, TEST_CONSTANT_PATH};
use super::{RequestContext, Servlet};
use crate::config::AppState;
use crate::http;
use crate::logger;
use crate::session;

/// Servlet mounted at `path`
fn servlet_for(path: &str) -> Option<&'static dyn Servlet> {
    match path {
        TEST_CONSTANT_PATH => Some(&TestConstantServlet),
        _ => None,
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method();
    let uri = req.uri();

    let access_log = state.config.logging.access_log;
    if access_log {
        logger::log_request(method, uri, req.version());
    }
    logger::log_headers_count(req.headers().len(), state.config.logging.show_headers);

    let mut response = dispatch(&req, &state);

    if let Ok(server_name) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(SERVER, server_name);
    }
    if access_log {
        logger::log_response(response.status().as_u16(), body_len(&response));
    }
    Ok(response)
}

fn dispatch<B>(req: &Request<B>, state: &AppState) -> Response<Full<Bytes>> {
    // 1. Check body size
    if let Some(resp) = check_body_size(req, state.config.http.max_body_size) {
        return resp;
    }

    // 2. Find the servlet for this path
    let path = req.uri().path();
    let Some(servlet) = servlet_for(path) else {
        return http::build_404_response();
    };

    // 3. Dispatch by method
    let session_id = req
        .headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|header| session::cookie_value(header, &state.config.session.cookie_name))
        .map(ToString::to_string);
    let is_head = *req.method() == Method::HEAD;
    let mut ctx = RequestContext::new(path, is_head, state, session_id);

    let result = match req.method() {
        &Method::GET | &Method::HEAD => servlet.do_get(&mut ctx),
        &Method::POST => servlet.do_post(&mut ctx),
        &Method::OPTIONS => return http::build_options_response(),
        _ => {
            logger::log_warning(&format!("Method not allowed: {}", req.method()));
            return http::build_405_response();
        }
    };

    // 4. Errors reaching this point are answered here
    let mut response = match result {
        Ok(resp) => resp,
        Err(e) => {
            logger::log_error(&format!("Request {path} failed: {e}"));
            http::build_500_response()
        }
    };

    if let Some(id) = ctx.created_session_id() {
        let cookie = session::session_cookie(&state.config.session.cookie_name, id);
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => logger::log_error(&format!("Invalid session cookie: {e}")),
        }
    }
    response
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

fn body_len(response: &Response<Full<Bytes>>) -> usize {
    response
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::constants::{constant_definition, ClassRegistry};
    use crate::context::WebContext;
    use crate::handler::test_constant::SOMETHING;
    use crate::listener::ConstantListener;
    use crate::view::ViewRegistry;
    use http_body_util::BodyExt;
    use serde_json::json;

    fn test_state(views: ViewRegistry) -> Arc<AppState> {
        let config = Config::load_from("does-not-exist/config").unwrap();
        let context = WebContext::with_constant_classes(Some(constant_definition::CLASS_NAME));
        ConstantListener::new(ClassRegistry::with_builtin())
            .context_initialized(&context)
            .unwrap();
        Arc::new(AppState::new(&config, Arc::new(context), views))
    }

    fn request(method: Method, path: &str, cookie: Option<&str>) -> Request<()> {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        builder.body(()).unwrap()
    }

    fn session_id(resp: &Response<Full<Bytes>>) -> String {
        let cookie = resp.headers()[SET_COOKIE].to_str().unwrap();
        session::cookie_value(cookie, "SESSIONID").unwrap().to_string()
    }

    async fn body_string(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_get_and_post_have_same_effect() {
        let state = test_state(ViewRegistry::with_builtin());

        for method in [Method::GET, Method::POST] {
            let resp = handle_request(request(method, TEST_CONSTANT_PATH, None), Arc::clone(&state))
                .await
                .unwrap();
            assert_eq!(resp.status(), 200);

            let id = session_id(&resp);
            let session = state.sessions.find(&id).unwrap();
            assert_eq!(session.attribute(constant_definition::FOO), Some(json!(SOMETHING)));
            assert_eq!(session.attribute_names(), vec![constant_definition::FOO]);

            let body = body_string(resp).await;
            assert!(body.contains(SOMETHING));
        }
    }

    #[tokio::test]
    async fn test_default_config_serves_page() {
        // no constantClassName configured, so nothing is published
        let config = Config::load_from("does-not-exist/config").unwrap();
        let context = WebContext::with_constant_classes(config.context.constant_class_name.as_deref());
        ConstantListener::new(ClassRegistry::with_builtin())
            .context_initialized(&context)
            .unwrap();
        let state = Arc::new(AppState::new(&config, Arc::new(context), ViewRegistry::with_builtin()));

        let resp = handle_request(request(Method::GET, TEST_CONSTANT_PATH, None), Arc::clone(&state))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let session = state.sessions.find(&session_id(&resp)).unwrap();
        assert_eq!(session.attribute(constant_definition::FOO), Some(json!(SOMETHING)));
        assert!(body_string(resp).await.contains("<span id=\"something\"></span>"));
    }

    #[tokio::test]
    async fn test_existing_session_is_reused() {
        let state = test_state(ViewRegistry::with_builtin());
        let first = handle_request(request(Method::GET, TEST_CONSTANT_PATH, None), Arc::clone(&state))
            .await
            .unwrap();
        let id = session_id(&first);

        let cookie = format!("SESSIONID={id}");
        let second = handle_request(
            request(Method::POST, TEST_CONSTANT_PATH, Some(&cookie)),
            Arc::clone(&state),
        )
        .await
        .unwrap();
        assert_eq!(second.status(), 200);
        assert!(second.headers().get(SET_COOKIE).is_none());
        assert_eq!(state.sessions.len(), 1);
    }

    #[tokio::test]
    async fn test_head_has_empty_body() {
        let state = test_state(ViewRegistry::with_builtin());
        let resp = handle_request(request(Method::HEAD, TEST_CONSTANT_PATH, None), state)
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        assert!(body_string(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let state = test_state(ViewRegistry::with_builtin());
        let resp = handle_request(request(Method::GET, "/nope", None), Arc::clone(&state))
            .await
            .unwrap();
        assert_eq!(resp.status(), 404);
        assert!(state.sessions.is_empty());
    }

    #[tokio::test]
    async fn test_method_handling() {
        let state = test_state(ViewRegistry::with_builtin());
        let resp = handle_request(request(Method::PUT, TEST_CONSTANT_PATH, None), Arc::clone(&state))
            .await
            .unwrap();
        assert_eq!(resp.status(), 405);

        let resp = handle_request(request(Method::OPTIONS, TEST_CONSTANT_PATH, None), Arc::clone(&state))
            .await
            .unwrap();
        assert_eq!(resp.status(), 204);
        assert!(state.sessions.is_empty());
    }

    #[tokio::test]
    async fn test_missing_view_is_500() {
        let state = test_state(ViewRegistry::new());
        let resp = handle_request(request(Method::GET, TEST_CONSTANT_PATH, None), Arc::clone(&state))
            .await
            .unwrap();
        assert_eq!(resp.status(), 500);
        // the session write happened before the failed forward
        assert_eq!(state.sessions.len(), 1);
    }

    #[tokio::test]
    async fn test_body_too_large() {
        let state = test_state(ViewRegistry::with_builtin());
        let req = Request::builder()
            .method(Method::POST)
            .uri(TEST_CONSTANT_PATH)
            .header("content-length", "99999999999")
            .body(())
            .unwrap();
        let resp = handle_request(req, state).await.unwrap();
        assert_eq!(resp.status(), 413);
    }
}
