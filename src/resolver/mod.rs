//! Redirect target resolution
//!
//! Reconstructs a redirect target from request path segments:
//! 1. Scheme detection and candidate assembly (`scheme`)
//! 2. Percent-decoding and absolute URL validation
//! 3. Query / fragment merge from the caller's request (`merge`)
//!
//! Everything here is pure and synchronous; the HTTP shell lives in `handler`.

mod merge;
mod scheme;

use std::borrow::Cow;

use percent_encoding::percent_decode_str;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub use merge::{parse_query, QueryPairs};

/// Why a path could not be turned into a redirect target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectionReason {
    #[error("no target host in path")]
    EmptyPath,
    #[error("target is not a valid absolute URL")]
    MalformedUrl,
    #[error("target scheme is not http or https")]
    DisallowedScheme,
}

/// How the resolved target is turned into a `Location` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectMode {
    /// Merge the caller's query and `hash` parameter into the parsed target
    #[default]
    Merge,
    /// Validate, then redirect to the undecoded candidate string unchanged
    Raw,
}

/// Percent-decode once when the candidate contains `%`.
///
/// A `%` without two hex digits after it, or a decoded byte sequence that is
/// not UTF-8, makes the candidate malformed.
fn decode_candidate(candidate: &str) -> Result<Cow<'_, str>, RejectionReason> {
    if !candidate.contains('%') {
        return Ok(Cow::Borrowed(candidate));
    }

    let bytes = candidate.as_bytes();
    let well_formed = bytes
        .iter()
        .enumerate()
        .filter(|(_, b)| **b == b'%')
        .all(|(i, _)| {
            bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit))
        });
    if !well_formed {
        return Err(RejectionReason::MalformedUrl);
    }

    percent_decode_str(candidate)
        .decode_utf8()
        .map_err(|_| RejectionReason::MalformedUrl)
}

/// Decode and parse a candidate, allowing only `http` and `https`
pub fn validate_candidate(candidate: &str) -> Result<Url, RejectionReason> {
    let decoded = decode_candidate(candidate)?;
    let url = Url::parse(&decoded).map_err(|_| RejectionReason::MalformedUrl)?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(RejectionReason::DisallowedScheme),
    }
}

/// Resolve path segments into the final redirect target, merging the
/// caller's query parameters and `hash` / `_hash` fragment.
pub fn resolve(segments: &[String], incoming_query: QueryPairs) -> Result<String, RejectionReason> {
    let candidate = scheme::build_candidate(segments)?;
    let mut url = validate_candidate(&candidate)?;
    merge::merge_into(&mut url, incoming_query);
    Ok(url.into())
}

/// Validate like [`resolve`] but return the candidate exactly as assembled
pub fn resolve_raw(segments: &[String]) -> Result<String, RejectionReason> {
    let candidate = scheme::build_candidate(segments)?;
    validate_candidate(&candidate)?;
    Ok(candidate)
}

pub fn resolve_with_mode(
    segments: &[String],
    incoming_query: QueryPairs,
    mode: RedirectMode,
) -> Result<String, RejectionReason> {
    match mode {
        RedirectMode::Merge => resolve(segments, incoming_query),
        RedirectMode::Raw => resolve_raw(segments),
    }
}
