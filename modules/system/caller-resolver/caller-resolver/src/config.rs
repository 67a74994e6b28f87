//! Resolver configuration.

use std::collections::HashMap;

use secrecy::SecretString;
use serde::Deserialize;

use caller_resolver_sdk::SubjectRecord;

/// Top-level resolver configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    /// Name of the cookie carrying the session token.
    pub session_cookie: String,
    /// Per-adapter resolve deadline in milliseconds.
    pub adapter_timeout_ms: u64,
    pub oauth: OauthConfig,
    pub signed: SignedConfig,
    /// Static session table: token -> subject.
    pub sessions: HashMap<String, SubjectRecord>,
    /// Static role table: role name -> entitlements.
    pub roles: HashMap<String, Vec<String>>,
    /// Static signer directory: signer id -> subject.
    pub signers: HashMap<String, SubjectRecord>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            session_cookie: default_session_cookie(),
            adapter_timeout_ms: default_adapter_timeout_ms(),
            oauth: OauthConfig::default(),
            signed: SignedConfig::default(),
            sessions: HashMap::new(),
            roles: HashMap::new(),
            signers: HashMap::new(),
        }
    }
}

/// OAuth bearer-token validation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OauthConfig {
    /// Shared HMAC secret for token validation.
    pub jwt_secret: SecretString,
    /// When set, tokens must carry this `iss` claim.
    pub issuer: Option<String>,
    /// Role assumed when a token carries no role claim.
    pub default_role: String,
}

impl Default for OauthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            issuer: None,
            default_role: default_role(),
        }
    }
}

/// Third-party request-signature settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SignedConfig {
    /// Shared secret the partner signs requests with.
    pub signing_secret: SecretString,
    /// Accepted clock skew, in seconds, on the signed timestamp.
    pub freshness_window_secs: i64,
    pub signature_header: String,
    pub timestamp_header: String,
    pub signer_header: String,
}

impl Default for SignedConfig {
    fn default() -> Self {
        Self {
            signing_secret: default_signing_secret(),
            freshness_window_secs: default_freshness_window_secs(),
            signature_header: default_signature_header(),
            timestamp_header: default_timestamp_header(),
            signer_header: default_signer_header(),
        }
    }
}

fn default_session_cookie() -> String {
    "session_id".to_string()
}

fn default_adapter_timeout_ms() -> u64 {
    1000
}

fn default_jwt_secret() -> SecretString {
    SecretString::from("demo-secret-key")
}

fn default_role() -> String {
    "user".to_string()
}

fn default_signing_secret() -> SecretString {
    SecretString::from("partner-signing-secret")
}

fn default_freshness_window_secs() -> i64 {
    300
}

fn default_signature_header() -> String {
    "x-partner-signature".to_string()
}

fn default_timestamp_header() -> String {
    "x-partner-timestamp".to_string()
}

fn default_signer_header() -> String {
    "x-partner-caller".to_string()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let cfg = ResolverConfig::default();
        assert_eq!(cfg.session_cookie, "session_id");
        assert_eq!(cfg.adapter_timeout_ms, 1000);
        assert_eq!(cfg.oauth.default_role, "user");
        assert_eq!(cfg.signed.freshness_window_secs, 300);
        assert!(cfg.sessions.is_empty());
    }

    #[test]
    fn deserializes_partial_yaml_like_json() {
        let cfg: ResolverConfig = serde_json::from_value(serde_json::json!({
            "session_cookie": "sid",
            "sessions": {
                "tok1": {
                    "principal_id": "user_a",
                    "tenant_id": "acme",
                    "entitlements": ["rag:read"]
                }
            },
            "roles": { "admin": ["rag:read", "rag:write"] }
        }))
        .expect("valid config");
        assert_eq!(cfg.session_cookie, "sid");
        assert_eq!(cfg.sessions["tok1"].principal_id, "user_a");
        assert_eq!(cfg.roles["admin"].len(), 2);
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = serde_json::from_value::<ResolverConfig>(serde_json::json!({
            "session_cooky": "sid"
        }));
        assert!(err.is_err());
    }
}
