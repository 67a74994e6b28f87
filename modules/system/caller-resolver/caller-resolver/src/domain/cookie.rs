//! Session-cookie adapter.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use caller_resolver_sdk::{AdapterError, CallerRequest, CredentialAdapter, SessionStore};
use caller_security::{AuthMethod, AuthStrength, Principal};

use super::subject_principal;

/// Resolves a first-party browser session cookie into a strong principal.
pub struct CookieAdapter {
    cookie_name: String,
    store: Arc<dyn SessionStore>,
}

impl CookieAdapter {
    #[must_use]
    pub fn new(cookie_name: impl Into<String>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            store,
        }
    }
}

#[async_trait]
impl CredentialAdapter for CookieAdapter {
    fn name(&self) -> &'static str {
        "cookie"
    }

    fn applies(&self, request: &CallerRequest) -> bool {
        request.has_cookie(&self.cookie_name)
    }

    async fn resolve(&self, request: &CallerRequest) -> Result<Option<Principal>, AdapterError> {
        let Some(token) = request.cookie(&self.cookie_name) else {
            return Ok(None);
        };
        match self.store.get(token).await? {
            Some(record) => Ok(Some(subject_principal(
                record,
                AuthMethod::Cookie,
                AuthStrength::Strong,
            ))),
            None => {
                debug!("Session token not found in store");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::collections::HashMap;

    use bytes::Bytes;
    use http::HeaderMap;

    use caller_resolver_sdk::SubjectRecord;

    use crate::infra::static_tables::StaticSessionStore;

    use super::*;

    fn store() -> Arc<dyn SessionStore> {
        let mut sessions = HashMap::new();
        sessions.insert(
            "sess_1".to_string(),
            SubjectRecord {
                principal_id: "user_a".to_string(),
                tenant_id: Some("acme".to_string()),
                entitlements: ["rag:read".to_string()].into(),
            },
        );
        Arc::new(StaticSessionStore::new(sessions))
    }

    fn request_with_cookie(value: &str) -> CallerRequest {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::COOKIE,
            format!("session_id={value}").parse().expect("header"),
        );
        CallerRequest::new(headers, Bytes::new())
    }

    #[tokio::test]
    async fn resolves_known_session() {
        let adapter = CookieAdapter::new("session_id", store());
        let request = request_with_cookie("sess_1");
        assert!(adapter.applies(&request));
        let principal = adapter.resolve(&request).await.expect("no fault").expect("resolved");
        assert_eq!(principal.id(), "user_a");
        assert_eq!(principal.tenant(), Some("acme"));
        assert_eq!(principal.method(), AuthMethod::Cookie);
        assert_eq!(principal.strength(), AuthStrength::Strong);
    }

    #[tokio::test]
    async fn rejects_unknown_session() {
        let adapter = CookieAdapter::new("session_id", store());
        let request = request_with_cookie("sess_nope");
        assert!(adapter.applies(&request));
        assert!(adapter.resolve(&request).await.expect("no fault").is_none());
    }

    #[tokio::test]
    async fn does_not_apply_without_cookie() {
        let adapter = CookieAdapter::new("session_id", store());
        let request = CallerRequest::new(HeaderMap::new(), Bytes::new());
        assert!(!adapter.applies(&request));
    }
}
