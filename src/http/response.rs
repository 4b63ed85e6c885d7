//! HTTP response building module
//!
//! One constructor per response kind. Every response carries the CORS
//! headers and the configured `Server` header.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, ALLOW, CONTENT_LENGTH, CONTENT_TYPE, LOCATION, SERVER};
use hyper::http::response::Builder;
use hyper::{Response, StatusCode};

use crate::config::HttpConfig;

pub const CORS_ALLOW_ORIGIN: &str = "*";
pub const CORS_ALLOW_METHODS: &str = "GET, OPTIONS";
pub const CORS_ALLOW_HEADERS: &str = "Content-Type";

/// Start a response with the headers every reply carries
fn base_builder(status: StatusCode, http_config: &HttpConfig) -> Builder {
    Response::builder()
        .status(status)
        .header(SERVER, &http_config.server_name)
        .header("Access-Control-Allow-Origin", CORS_ALLOW_ORIGIN)
        .header("Access-Control-Allow-Methods", CORS_ALLOW_METHODS)
        .header("Access-Control-Allow-Headers", CORS_ALLOW_HEADERS)
}

fn finish(builder: Builder, body: Bytes, label: &str) -> Response<Full<Bytes>> {
    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error(label, &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build 302 redirect response
pub fn build_redirect_response(location: HeaderValue, http_config: &HttpConfig) -> Response<Full<Bytes>> {
    let builder = base_builder(StatusCode::FOUND, http_config).header(LOCATION, location);
    finish(builder, Bytes::new(), "302")
}

/// Build JSON error response from a pre-serialized body
pub fn build_json_error_response(
    status: StatusCode,
    body: Bytes,
    http_config: &HttpConfig,
) -> Response<Full<Bytes>> {
    let builder = base_builder(status, http_config).header(CONTENT_TYPE, "application/json");
    finish(builder, body, status.as_str())
}

/// Build generic HTML response
pub fn build_html_response(
    content: &'static str,
    is_head: bool,
    http_config: &HttpConfig,
) -> Response<Full<Bytes>> {
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from_static(content.as_bytes())
    };

    let builder = base_builder(StatusCode::OK, http_config)
        .header(CONTENT_TYPE, "text/html; charset=utf-8")
        .header(CONTENT_LENGTH, content.len());
    finish(builder, body, "HTML")
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(http_config: &HttpConfig) -> Response<Full<Bytes>> {
    finish(base_builder(StatusCode::OK, http_config), Bytes::new(), "OPTIONS")
}

/// Build 404 Not Found response
pub fn build_404_response(http_config: &HttpConfig) -> Response<Full<Bytes>> {
    let builder = base_builder(StatusCode::NOT_FOUND, http_config).header(CONTENT_TYPE, "text/plain");
    finish(builder, Bytes::from_static(b"404 Not Found"), "404")
}

/// Build 405 Method Not Allowed response
pub fn build_405_response(http_config: &HttpConfig) -> Response<Full<Bytes>> {
    let builder = base_builder(StatusCode::METHOD_NOT_ALLOWED, http_config)
        .header(ALLOW, "GET, HEAD, OPTIONS")
        .header(CONTENT_TYPE, "text/plain");
    finish(builder, Bytes::from_static(b"405 Method Not Allowed"), "405")
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
