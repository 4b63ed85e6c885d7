//! Query and fragment merging
//!
//! Forwards the caller's own query parameters onto the redirect target.
//! `hash` / `_hash` parameters become the target fragment instead, since
//! browsers never send a fragment to the server.

use url::form_urlencoded;
use url::Url;

/// Ordered, decoded query pairs
pub type QueryPairs = Vec<(String, String)>;

/// Keys carrying a fragment, in precedence order
const HASH_KEYS: [&str; 2] = ["hash", "_hash"];

/// Decode a raw query string (without leading `?`)
pub fn parse_query(query: Option<&str>) -> QueryPairs {
    query
        .map(|q| {
            form_urlencoded::parse(q.trim_start_matches('?').as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default()
}

fn serialize_query(pairs: &[(String, String)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter())
        .finish()
}

fn first_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Pull the fragment out of the forwarded parameters.
///
/// Returns the fragment without its leading `#`. An empty `hash` falls
/// through to `_hash`; when neither has a value nothing is removed.
pub fn take_fragment(pairs: &mut QueryPairs) -> Option<String> {
    let value = HASH_KEYS
        .iter()
        .find_map(|key| first_value(pairs.as_slice(), key).filter(|v| !v.is_empty()))?
        .to_string();

    pairs.retain(|(k, _)| !HASH_KEYS.contains(&k.as_str()));

    match value.strip_prefix('#') {
        Some(stripped) => Some(stripped.to_string()),
        None => Some(value),
    }
}

/// Replace the first `key` pair and drop later duplicates, or append
fn set_pair(pairs: &mut QueryPairs, key: &str, value: &str) {
    let Some(idx) = pairs.iter().position(|(k, _)| k == key) else {
        pairs.push((key.to_string(), value.to_string()));
        return;
    };

    value.clone_into(&mut pairs[idx].1);
    let mut seen = 0usize;
    pairs.retain(|(k, _)| {
        if k != key {
            return true;
        }
        seen += 1;
        seen == 1
    });
}

/// Merge the caller's query into `target` and apply any derived fragment
pub fn merge_into(target: &mut Url, mut incoming: QueryPairs) {
    let fragment = take_fragment(&mut incoming);

    if !incoming.is_empty() {
        let merged = match target.query().filter(|q| !q.is_empty()) {
            Some(existing) => {
                let mut pairs = parse_query(Some(existing));
                for (key, value) in &incoming {
                    set_pair(&mut pairs, key, value);
                }
                pairs
            }
            None => incoming,
        };
        target.set_query(Some(&serialize_query(&merged)));
    }

    if let Some(fragment) = fragment {
        target.set_fragment(Some(&fragment));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> QueryPairs {
        items
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_parse_query() {
        assert!(parse_query(None).is_empty());
        assert_eq!(
            parse_query(Some("a=1&b=hello+world&c=%23x")),
            pairs(&[("a", "1"), ("b", "hello world"), ("c", "#x")])
        );
    }

    #[test]
    fn test_take_fragment_prefers_hash() {
        let mut query = pairs(&[("hash", "one"), ("_hash", "two"), ("keep", "1")]);
        assert_eq!(take_fragment(&mut query), Some("one".to_string()));
        assert_eq!(query, pairs(&[("keep", "1")]));
    }

    #[test]
    fn test_take_fragment_underscore_and_prefix() {
        let mut query = pairs(&[("_hash", "#tok")]);
        assert_eq!(take_fragment(&mut query), Some("tok".to_string()));
        assert!(query.is_empty());

        // Empty `hash` falls through to `_hash`
        let mut query = pairs(&[("hash", ""), ("_hash", "x")]);
        assert_eq!(take_fragment(&mut query), Some("x".to_string()));
        assert!(query.is_empty());
    }

    #[test]
    fn test_take_fragment_absent() {
        let mut query = pairs(&[("hash", ""), ("a", "1")]);
        assert_eq!(take_fragment(&mut query), None);
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn test_set_pair() {
        let mut query = pairs(&[("a", "1"), ("b", "2"), ("a", "3")]);
        set_pair(&mut query, "a", "9");
        assert_eq!(query, pairs(&[("a", "9"), ("b", "2")]));

        set_pair(&mut query, "c", "4");
        assert_eq!(query, pairs(&[("a", "9"), ("b", "2"), ("c", "4")]));
    }

    #[test]
    fn test_merge_overlays_existing_query() {
        let mut url = Url::parse("https://postonus.com/callback?a=1&z=0").unwrap();
        merge_into(&mut url, pairs(&[("a", "2"), ("b", "3")]));
        assert_eq!(url.as_str(), "https://postonus.com/callback?a=2&z=0&b=3");
    }

    #[test]
    fn test_merge_sets_query_when_target_has_none() {
        let mut url = Url::parse("https://postonus.com/callback").unwrap();
        merge_into(&mut url, pairs(&[("code", "abc"), ("state", "x y")]));
        assert_eq!(url.as_str(), "https://postonus.com/callback?code=abc&state=x+y");
    }

    #[test]
    fn test_merge_leaves_query_without_params() {
        let mut url = Url::parse("https://postonus.com/cb?a=1#old").unwrap();
        merge_into(&mut url, pairs(&[("hash", "new")]));
        assert_eq!(url.as_str(), "https://postonus.com/cb?a=1#new");

        let mut url = Url::parse("https://postonus.com/cb?a=%20").unwrap();
        merge_into(&mut url, Vec::new());
        assert_eq!(url.as_str(), "https://postonus.com/cb?a=%20");
    }
}
