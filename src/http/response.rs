//! HTTP response building module
//!
//! Provides builders for the status code responses used by the router and views.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Methods answered by servlet mappings
pub const ALLOWED_METHODS: &str = "GET, HEAD, POST, OPTIONS";

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_text_response(404, "404 Not Found")
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", ALLOWED_METHODS)
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build OPTIONS response
pub fn build_options_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(204)
        .header("Allow", ALLOWED_METHODS)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    build_text_response(413, "413 Payload Too Large")
}

/// Build 500 Internal Server Error response
pub fn build_500_response() -> Response<Full<Bytes>> {
    build_text_response(500, "500 Internal Server Error")
}

/// Build generic HTML response
pub fn build_html_response(content: String, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    Response::builder()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

fn build_text_response(status: u16, text: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(text)))
        .unwrap_or_else(|e| {
            log_build_error(&status.to_string(), &e);
            Response::new(Full::new(Bytes::from(text)))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_response_head_has_no_body() {
        let resp = build_html_response("<p>hi</p>".to_string(), true);
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["content-length"], "9");
        assert_eq!(resp.headers()["content-type"], "text/html; charset=utf-8");
    }

    #[test]
    fn test_error_responses() {
        assert_eq!(build_404_response().status(), 404);
        assert_eq!(build_413_response().status(), 413);
        assert_eq!(build_500_response().status(), 500);
        let resp = build_405_response();
        assert_eq!(resp.status(), 405);
        assert_eq!(resp.headers()["allow"], ALLOWED_METHODS);
        assert_eq!(build_options_response().status(), 204);
    }
}
