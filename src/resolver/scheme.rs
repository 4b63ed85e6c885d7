//! Scheme detection and candidate assembly
//!
//! Turns path segments into a scheme-qualified candidate string. No parsing
//! or validation happens here; see `resolver::validate_candidate`.

use super::RejectionReason;

/// Hosts that default to plain `http`
const LOCAL_HOSTS: [&str; 3] = ["localhost", "127.0.0.1", "::1"];

/// `host:port` prefixes that default to plain `http`
const LOCAL_HOST_PREFIXES: [&str; 3] = ["localhost:", "127.0.0.1:", "[::1]:"];

/// Scheme named explicitly by the first path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemeToken {
    Http,
    Https,
    None,
}

impl SchemeToken {
    /// Inspect the first segment. Matching is case-sensitive.
    pub fn detect(first: &str) -> Self {
        match first {
            "http" => Self::Http,
            "https" => Self::Https,
            _ => Self::None,
        }
    }

    pub const fn as_str(self) -> Option<&'static str> {
        match self {
            Self::Http => Some("http"),
            Self::Https => Some("https"),
            Self::None => None,
        }
    }
}

/// Whether a host (optionally with `:port`) is a local development address
pub fn is_local_host(host: &str) -> bool {
    LOCAL_HOSTS.contains(&host)
        || LOCAL_HOST_PREFIXES
            .iter()
            .any(|prefix| host.starts_with(prefix))
}

/// Scheme used when the path carries none
pub fn default_scheme(first: &str) -> &'static str {
    if is_local_host(first) {
        "http"
    } else {
        "https"
    }
}

/// Build the candidate URL string from the path segments
pub fn build_candidate(segments: &[String]) -> Result<String, RejectionReason> {
    let Some(first) = segments.first() else {
        return Err(RejectionReason::EmptyPath);
    };

    // Explicit scheme: "/https/host/path"
    if let Some(scheme) = SchemeToken::detect(first).as_str() {
        let rest = &segments[1..];
        if rest.is_empty() {
            return Err(RejectionReason::EmptyPath);
        }
        return Ok(format!("{scheme}://{}", rest.join("/")));
    }

    let joined = segments.join("/");

    // Already scheme-qualified; "https:" + "" + "host" also lands here
    if joined.contains("://") {
        return Ok(joined);
    }

    Ok(format!("{}://{joined}", default_scheme(first)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segs(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_detect_scheme_token() {
        assert_eq!(SchemeToken::detect("http"), SchemeToken::Http);
        assert_eq!(SchemeToken::detect("https"), SchemeToken::Https);
        assert_eq!(SchemeToken::detect("HTTPS"), SchemeToken::None);
        assert_eq!(SchemeToken::detect("https:"), SchemeToken::None);
        assert_eq!(SchemeToken::detect("example.com"), SchemeToken::None);
    }

    #[test]
    fn test_is_local_host() {
        assert!(is_local_host("localhost"));
        assert!(is_local_host("localhost:5173"));
        assert!(is_local_host("127.0.0.1"));
        assert!(is_local_host("127.0.0.1:3000"));
        assert!(is_local_host("::1"));
        assert!(is_local_host("[::1]:8080"));

        assert!(!is_local_host("localhost.example.com"));
        assert!(!is_local_host("127.0.0.10"));
        assert!(!is_local_host("[::1]"));
        assert!(!is_local_host("postonus.com"));
    }

    #[test]
    fn test_explicit_scheme() {
        assert_eq!(
            build_candidate(&segs(&["http", "localhost:5173", "callback"])).unwrap(),
            "http://localhost:5173/callback"
        );
        assert_eq!(
            build_candidate(&segs(&["https", "postonus.com"])).unwrap(),
            "https://postonus.com"
        );
    }

    #[test]
    fn test_explicit_scheme_without_host() {
        assert_eq!(
            build_candidate(&segs(&["http"])),
            Err(RejectionReason::EmptyPath)
        );
        assert_eq!(build_candidate(&[]), Err(RejectionReason::EmptyPath));
    }

    #[test]
    fn test_default_scheme() {
        assert_eq!(
            build_candidate(&segs(&["localhost:5173", "callback"])).unwrap(),
            "http://localhost:5173/callback"
        );
        assert_eq!(
            build_candidate(&segs(&["postonus.com", "callback"])).unwrap(),
            "https://postonus.com/callback"
        );
        // Only the first segment is inspected
        assert_eq!(
            build_candidate(&segs(&["example.com", "localhost"])).unwrap(),
            "https://example.com/localhost"
        );
    }

    #[test]
    fn test_embedded_scheme_used_verbatim() {
        assert_eq!(
            build_candidate(&segs(&["https:", "", "example.com", "cb"])).unwrap(),
            "https://example.com/cb"
        );
        // Wins over the localhost heuristic
        assert_eq!(
            build_candidate(&segs(&["https://localhost:5173", "cb"])).unwrap(),
            "https://localhost:5173/cb"
        );
        assert_eq!(
            build_candidate(&segs(&["ftp://evil.example", "x"])).unwrap(),
            "ftp://evil.example/x"
        );
    }
}
