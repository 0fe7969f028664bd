//! HTTP response building module
//!
//! Builders for the handful of responses the mock can produce.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

/// Build a 200 response with a fixed body
fn build_ok_response(body: &'static str, content_type: &str) -> Response<Full<Bytes>> {
    build_response(StatusCode::OK, content_type, Bytes::from_static(body.as_bytes()))
}

/// Build a 200 `text/plain` response
pub fn build_text_response(body: &'static str) -> Response<Full<Bytes>> {
    build_ok_response(body, CONTENT_TYPE_TEXT)
}

/// Build a 200 `application/json` response from a literal payload
pub fn build_json_response(body: &'static str) -> Response<Full<Bytes>> {
    build_ok_response(body, CONTENT_TYPE_JSON)
}

/// Build health check response
pub fn build_health_response(status: &'static str) -> Response<Full<Bytes>> {
    let mut resp = build_text_response(status);
    resp.headers_mut().insert(
        hyper::header::CACHE_CONTROL,
        hyper::header::HeaderValue::from_static("no-cache, no-store"),
    );
    resp
}

/// Build 400 Bad Request response with a JSON error body
pub fn build_400_response(message: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "error": message }).to_string();
    build_response(StatusCode::BAD_REQUEST, CONTENT_TYPE_JSON, Bytes::from(body))
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_response(
        StatusCode::NOT_FOUND,
        CONTENT_TYPE_TEXT,
        Bytes::from_static(b"404 Not Found"),
    )
}

/// Build 405 Method Not Allowed response
pub fn build_405_response(allow: &'static str) -> Response<Full<Bytes>> {
    let mut resp = build_response(
        StatusCode::METHOD_NOT_ALLOWED,
        CONTENT_TYPE_TEXT,
        Bytes::from_static(b"405 Method Not Allowed"),
    );
    resp.headers_mut().insert(
        hyper::header::ALLOW,
        hyper::header::HeaderValue::from_static(allow),
    );
    resp
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    build_response(
        StatusCode::PAYLOAD_TOO_LARGE,
        CONTENT_TYPE_TEXT,
        Bytes::from_static(b"413 Payload Too Large"),
    )
}

fn build_response(status: StatusCode, content_type: &str, body: Bytes) -> Response<Full<Bytes>> {
    let content_length = body.len();
    Response::builder()
        .status(status)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status, &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: StatusCode, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_response_headers() {
        let resp = build_json_response("[]");
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], CONTENT_TYPE_JSON);
        assert_eq!(resp.headers()["content-length"], "2");
    }

    #[test]
    fn test_405_carries_allow() {
        let resp = build_405_response("POST");
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()["allow"], "POST");
    }

    #[test]
    fn test_health_not_cached() {
        let resp = build_health_response("ok");
        assert_eq!(resp.headers()["cache-control"], "no-cache, no-store");
    }
}
