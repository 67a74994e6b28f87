//! Ordered resolution chain.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use caller_resolver_sdk::{CallerRequest, CredentialAdapter};
use caller_security::Principal;

use crate::config::ResolverConfig;
use crate::infra::static_tables::{
    SharedSecretVerifier, StaticRoleMapping, StaticSessionStore, StaticSignerDirectory,
};

use super::cookie::CookieAdapter;
use super::oauth::OauthAdapter;
use super::signed::SignedRequestAdapter;

/// Runs adapters in order and returns the first resolved principal.
///
/// The chain is total: a request that matches no adapter, or whose matching
/// adapters all reject, fault or time out, resolves to the anonymous
/// principal.
pub struct ResolutionChain {
    adapters: Vec<Arc<dyn CredentialAdapter>>,
    resolve_timeout: Duration,
}

impl ResolutionChain {
    #[must_use]
    pub fn new(adapters: Vec<Arc<dyn CredentialAdapter>>, resolve_timeout: Duration) -> Self {
        Self {
            adapters,
            resolve_timeout,
        }
    }

    /// Builds the standard cookie, OAuth, signed-request chain backed by
    /// the static tables from configuration.
    #[must_use]
    pub fn from_config(config: &ResolverConfig) -> Self {
        let store = Arc::new(StaticSessionStore::new(config.sessions.clone()));
        let roles = Arc::new(StaticRoleMapping::new(config.roles.clone()));
        let directory = Arc::new(StaticSignerDirectory::new(config.signers.clone()));
        let verifier = Arc::new(SharedSecretVerifier::new(
            config.signed.signing_secret.clone(),
        ));

        let adapters: Vec<Arc<dyn CredentialAdapter>> = vec![
            Arc::new(CookieAdapter::new(config.session_cookie.clone(), store)),
            Arc::new(OauthAdapter::new(&config.oauth, roles)),
            Arc::new(SignedRequestAdapter::new(
                &config.signed,
                verifier,
                directory,
            )),
        ];
        Self::new(adapters, Duration::from_millis(config.adapter_timeout_ms))
    }

    /// Resolves the request to a principal. Never fails: adapter faults and
    /// timeouts only remove that adapter from consideration.
    #[tracing::instrument(skip_all)]
    pub async fn resolve(&self, request: &CallerRequest) -> Principal {
        for adapter in &self.adapters {
            if !adapter.applies(request) {
                continue;
            }
            match tokio::time::timeout(self.resolve_timeout, adapter.resolve(request)).await {
                Ok(Ok(Some(principal))) => {
                    debug!(adapter = adapter.name(), principal = principal.id(), "Resolved");
                    return principal;
                }
                Ok(Ok(None)) => {
                    debug!(adapter = adapter.name(), "Credentials rejected");
                }
                Ok(Err(err)) => {
                    // A faulting adapter must not abort the chain.
                    warn!(adapter = adapter.name(), error = %err, "Adapter fault");
                }
                Err(_) => {
                    warn!(adapter = adapter.name(), "Adapter timed out");
                }
            }
        }
        Principal::anonymous()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use async_trait::async_trait;
    use bytes::Bytes;
    use http::HeaderMap;

    use caller_resolver_sdk::AdapterError;
    use caller_security::{AuthMethod, AuthStrength};

    use super::*;

    enum Outcome {
        Resolve(&'static str),
        Reject,
        Fault,
        Hang,
    }

    struct FixedAdapter {
        applies: bool,
        outcome: Outcome,
    }

    #[async_trait]
    impl CredentialAdapter for FixedAdapter {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn applies(&self, _request: &CallerRequest) -> bool {
            self.applies
        }

        async fn resolve(&self, _request: &CallerRequest) -> Result<Option<Principal>, AdapterError> {
            match self.outcome {
                Outcome::Resolve(id) => Ok(Some(
                    Principal::builder()
                        .id(id)
                        .method(AuthMethod::Cookie)
                        .strength(AuthStrength::Strong)
                        .build(),
                )),
                Outcome::Reject => Ok(None),
                Outcome::Fault => Err(AdapterError::Internal("backend down".to_string())),
                Outcome::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(None)
                }
            }
        }
    }

    fn chain(specs: Vec<(bool, Outcome)>) -> ResolutionChain {
        let adapters = specs
            .into_iter()
            .map(|(applies, outcome)| {
                Arc::new(FixedAdapter { applies, outcome }) as Arc<dyn CredentialAdapter>
            })
            .collect();
        ResolutionChain::new(adapters, Duration::from_millis(50))
    }

    fn request() -> CallerRequest {
        CallerRequest::new(HeaderMap::new(), Bytes::new())
    }

    #[tokio::test]
    async fn first_match_wins() {
        let chain = chain(vec![
            (true, Outcome::Resolve("first")),
            (true, Outcome::Resolve("second")),
        ]);
        assert_eq!(chain.resolve(&request()).await.id(), "first");
    }

    #[tokio::test]
    async fn skips_non_applying_adapters() {
        let chain = chain(vec![
            (false, Outcome::Resolve("skipped")),
            (true, Outcome::Resolve("taken")),
        ]);
        assert_eq!(chain.resolve(&request()).await.id(), "taken");
    }

    #[tokio::test]
    async fn rejection_falls_through() {
        let chain = chain(vec![
            (true, Outcome::Reject),
            (true, Outcome::Resolve("fallback")),
        ]);
        assert_eq!(chain.resolve(&request()).await.id(), "fallback");
    }

    #[tokio::test]
    async fn fault_falls_through() {
        let chain = chain(vec![
            (true, Outcome::Fault),
            (true, Outcome::Resolve("fallback")),
        ]);
        assert_eq!(chain.resolve(&request()).await.id(), "fallback");
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_falls_through() {
        let chain = chain(vec![
            (true, Outcome::Hang),
            (true, Outcome::Resolve("fallback")),
        ]);
        assert_eq!(chain.resolve(&request()).await.id(), "fallback");
    }

    #[tokio::test]
    async fn empty_chain_resolves_anonymous() {
        let chain = chain(vec![]);
        let principal = chain.resolve(&request()).await;
        assert_eq!(principal.method(), AuthMethod::Anonymous);
        assert!(!principal.is_authenticated());
    }

    #[tokio::test]
    async fn all_rejecting_resolves_anonymous() {
        let chain = chain(vec![(true, Outcome::Reject), (true, Outcome::Fault)]);
        let principal = chain.resolve(&request()).await;
        assert_eq!(principal.id(), "anonymous");
    }
}
