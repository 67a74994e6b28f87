//! Shared application state.

use std::sync::Arc;

use caller_authz::{Authorizer, PolicyRegistry};
use caller_resolver::ResolutionChain;

use crate::config::GatewayConfig;

/// State shared by the middleware and handlers. Everything here is
/// read-mostly and safe for concurrent requests.
#[derive(Clone)]
pub struct AppState {
    pub chain: Arc<ResolutionChain>,
    pub authorizer: Arc<Authorizer>,
    pub body_limit_bytes: usize,
}

impl AppState {
    #[must_use]
    pub fn from_config(cfg: &GatewayConfig) -> Self {
        let registry = PolicyRegistry::from_policies(cfg.authorization.policies.clone());
        Self {
            chain: Arc::new(ResolutionChain::from_config(&cfg.resolver)),
            authorizer: Arc::new(Authorizer::new(
                Arc::new(registry),
                cfg.authorization.missing_policy,
            )),
            body_limit_bytes: cfg.server.body_limit_bytes,
        }
    }
}
