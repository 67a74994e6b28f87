//! Gateway configuration: YAML file with environment overrides.

use std::net::SocketAddr;
use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use serde::Deserialize;

use caller_authz::{MissingPolicy, OperationPolicy};
use caller_resolver::ResolverConfig;
use caller_security::AuthStrength;

/// Top-level gateway configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct GatewayConfig {
    pub server: ServerConfig,
    pub resolver: ResolverConfig,
    pub authorization: AuthorizationConfig,
}

impl GatewayConfig {
    /// Load configuration from an optional YAML file, overlaid with
    /// `CALLER_GATEWAY_*` environment variables (`__` as section separator).
    ///
    /// # Errors
    ///
    /// Returns an error when the file or environment contains invalid or
    /// unknown fields.
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed("CALLER_GATEWAY_").split("__"))
            .extract()
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Listen address.
    pub bind_addr: SocketAddr,

    /// Maximum buffered request body size, in bytes. Bodies are buffered
    /// once so signature adapters can verify them.
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            body_limit_bytes: default_body_limit_bytes(),
        }
    }
}

/// Authorization settings and the startup policy set.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthorizationConfig {
    /// Behavior when no policy is registered for an operation. `allow`
    /// (default) fails open; `deny` fails closed.
    pub missing_policy: MissingPolicy,

    /// Policies registered at startup.
    pub policies: Vec<OperationPolicy>,
}

impl Default for AuthorizationConfig {
    fn default() -> Self {
        Self {
            missing_policy: MissingPolicy::Allow,
            policies: default_policies(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8000))
}

fn default_body_limit_bytes() -> usize {
    1024 * 1024
}

/// Built-in policies for the bundled tools.
fn default_policies() -> Vec<OperationPolicy> {
    vec![
        OperationPolicy::new(
            "rag_search",
            ["rag:read".to_owned()],
            AuthStrength::Weak,
        ),
        OperationPolicy::new(
            "diagnostics",
            ["diag:read".to_owned()],
            AuthStrength::Strong,
        ),
    ]
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn defaults_register_tool_policies() {
        let cfg = GatewayConfig::default();
        assert_eq!(cfg.authorization.missing_policy, MissingPolicy::Allow);
        assert_eq!(cfg.authorization.policies.len(), 2);
        assert_eq!(cfg.server.bind_addr.port(), 8000);
    }

    #[test]
    fn load_without_file_yields_defaults() {
        let cfg = GatewayConfig::load(None).unwrap();
        assert_eq!(cfg.resolver.session_cookie, "session_id");
    }
}
