//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method check, mount-path
//! matching, then either the help page or a resolved redirect.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderValue, LOCATION, REFERER, USER_AGENT};
use hyper::{Method, Request, Response, StatusCode};
use percent_encoding::percent_decode_str;

use super::help::HELP_HTML;
use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::resolver::{self, RejectionReason};

/// Where a request path lands relative to the mount point
#[derive(Debug, PartialEq, Eq)]
pub enum PathTarget {
    /// The mount point itself
    Root,
    /// Not under the mount point
    Outside,
    /// Decoded path segments after the mount point
    Segments(Vec<String>),
    /// A segment that does not percent-decode to UTF-8
    Undecodable,
}

/// Split a request path into redirect segments.
///
/// Strips `mount_path`, then splits on `/` and percent-decodes each segment
/// once. Empty segments are kept so `https:/` + `/host` survives as
/// `["https:", "", "host"]`. A segment that decodes to invalid UTF-8 makes
/// the whole path [`PathTarget::Undecodable`].
pub fn segments_from_path(path: &str, mount_path: &str) -> PathTarget {
    let mount = mount_path.trim_end_matches('/');
    let Some(rest) = path.strip_prefix(mount) else {
        return PathTarget::Outside;
    };
    if !rest.is_empty() && !rest.starts_with('/') {
        return PathTarget::Outside;
    }

    let rest = rest.strip_prefix('/').unwrap_or(rest);
    if rest.is_empty() {
        return PathTarget::Root;
    }

    rest.split('/')
        .map(|segment| {
            percent_decode_str(segment)
                .decode_utf8()
                .map(std::borrow::Cow::into_owned)
        })
        .collect::<Result<Vec<_>, _>>()
        .map_or(PathTarget::Undecodable, PathTarget::Segments)
}

/// Resolve segments and turn the target into a `Location` value
fn resolve_location(
    segments: &[String],
    query: Option<&str>,
    state: &AppState,
) -> Result<HeaderValue, RejectionReason> {
    let incoming = resolver::parse_query(query);
    let target = resolver::resolve_with_mode(segments, incoming, state.config.redirect.mode)?;
    HeaderValue::try_from(target).map_err(|_| RejectionReason::MalformedUrl)
}

fn dispatch<B>(req: &Request<B>, state: &AppState) -> Response<Full<Bytes>> {
    let http_config = &state.config.http;
    let method = req.method();

    if method == Method::OPTIONS {
        return http::build_options_response(http_config);
    }
    if method != Method::GET && method != Method::HEAD {
        logger::log_warning(&format!("Method not allowed: {method}"));
        return http::build_405_response(http_config);
    }

    let uri = req.uri();
    match segments_from_path(uri.path(), &state.config.redirect.mount_path) {
        PathTarget::Root => http::build_html_response(HELP_HTML, method == Method::HEAD, http_config),
        PathTarget::Outside => http::build_404_response(http_config),
        PathTarget::Undecodable => reject(RejectionReason::MalformedUrl, uri.path(), state),
        PathTarget::Segments(segments) => match resolve_location(&segments, uri.query(), state) {
            Ok(location) => http::build_redirect_response(location, http_config),
            Err(reason) => reject(reason, uri.path(), state),
        },
    }
}

fn reject(reason: RejectionReason, path: &str, state: &AppState) -> Response<Full<Bytes>> {
    tracing::debug!(path, %reason, "rejected redirect");
    http::build_json_error_response(
        StatusCode::BAD_REQUEST,
        state.error_body.clone(),
        &state.config.http,
    )
}

fn header_string<B>(req: &Request<B>, name: hyper::header::HeaderName) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn build_access_entry<B>(
    req: &Request<B>,
    peer_addr: SocketAddr,
    response: &Response<Full<Bytes>>,
    started: Instant,
) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = match req.version() {
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        _ => "1.1",
    }
    .to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0);
    entry.location = response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    entry.referer = header_string(req, REFERER);
    entry.user_agent = header_string(req, USER_AGENT);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let response = dispatch(&req, &state);

    if state.access_log() {
        let entry = build_access_entry(&req, peer_addr, &response, started);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}
