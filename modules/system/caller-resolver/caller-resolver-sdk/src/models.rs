//! Domain models for the caller resolver.

use std::collections::{BTreeSet, HashMap};

use bytes::Bytes;
use http::HeaderMap;
use http::header::{AUTHORIZATION, COOKIE};

/// Read-only view of an inbound request, as seen by credential adapters.
///
/// Exposes headers, parsed cookies, and the raw body bytes. Adapters never
/// mutate it; the view is built once per request before the resolution chain
/// runs.
#[derive(Debug, Clone)]
pub struct CallerRequest {
    headers: HeaderMap,
    cookies: HashMap<String, String>,
    body: Bytes,
}

impl CallerRequest {
    /// Build a view from request headers and the buffered body.
    ///
    /// Cookies are parsed once from the `Cookie` header; malformed pairs are
    /// skipped.
    #[must_use]
    pub fn new(headers: HeaderMap, body: Bytes) -> Self {
        let cookies = parse_cookies(&headers);
        Self {
            headers,
            cookies,
            body,
        }
    }

    /// Get a header value as UTF-8, if present and valid.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    #[must_use]
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }

    /// Get a cookie value by name.
    #[must_use]
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn has_cookie(&self, name: &str) -> bool {
        self.cookies.contains_key(name)
    }

    /// Raw body bytes (used for signature verification).
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Extract the bearer token from the `Authorization` header.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        self.headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer ").map(str::trim))
    }
}

fn parse_cookies(headers: &HeaderMap) -> HashMap<String, String> {
    let mut cookies = HashMap::new();
    for value in headers.get_all(COOKIE) {
        let Ok(raw) = value.to_str() else { continue };
        for pair in raw.split(';') {
            if let Some((name, val)) = pair.split_once('=') {
                cookies.insert(name.trim().to_owned(), val.trim().to_owned());
            }
        }
    }
    cookies
}

/// Identity record returned by external lookup capabilities (session store,
/// signer directory).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubjectRecord {
    /// Caller ID, unique within a tenant scope.
    pub principal_id: String,
    /// Caller's tenant, if any.
    #[serde(default)]
    pub tenant_id: Option<String>,
    /// Entitlements held by the caller.
    #[serde(default)]
    pub entitlements: BTreeSet<String>,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(
                http::header::HeaderName::try_from(*name).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn parses_multiple_cookies() {
        let req = CallerRequest::new(
            headers(&[("cookie", "session_id=sess_alice_123; theme=dark")]),
            Bytes::new(),
        );

        assert_eq!(req.cookie("session_id"), Some("sess_alice_123"));
        assert_eq!(req.cookie("theme"), Some("dark"));
        assert!(!req.has_cookie("missing"));
    }

    #[test]
    fn skips_malformed_cookie_pairs() {
        let req = CallerRequest::new(headers(&[("cookie", "garbage; a=1")]), Bytes::new());

        assert!(!req.has_cookie("garbage"));
        assert_eq!(req.cookie("a"), Some("1"));
    }

    #[test]
    fn extracts_bearer_token() {
        let req = CallerRequest::new(headers(&[("authorization", "Bearer abc.def")]), Bytes::new());
        assert_eq!(req.bearer_token(), Some("abc.def"));
    }

    #[test]
    fn non_bearer_authorization_is_ignored() {
        let req = CallerRequest::new(
            headers(&[("authorization", "Basic dXNlcjpwYXNz")]),
            Bytes::new(),
        );
        assert_eq!(req.bearer_token(), None);
    }

    #[test]
    fn subject_record_defaults() {
        let record: SubjectRecord =
            serde_json::from_str(r#"{"principal_id": "user_alice"}"#).unwrap();
        assert_eq!(record.principal_id, "user_alice");
        assert_eq!(record.tenant_id, None);
        assert!(record.entitlements.is_empty());
    }
}
