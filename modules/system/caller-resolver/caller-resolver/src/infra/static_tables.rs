//! In-memory lookup tables loaded from configuration.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

use caller_resolver_sdk::{
    LookupError, RoleMapping, SessionStore, SignatureVerifier, SignerDirectory, SubjectRecord,
};

type HmacSha256 = Hmac<Sha256>;

/// Session table backed by a config map.
pub struct StaticSessionStore {
    sessions: HashMap<String, SubjectRecord>,
}

impl StaticSessionStore {
    #[must_use]
    pub fn new(sessions: HashMap<String, SubjectRecord>) -> Self {
        Self { sessions }
    }
}

#[async_trait]
impl SessionStore for StaticSessionStore {
    async fn get(&self, session_id: &str) -> Result<Option<SubjectRecord>, LookupError> {
        Ok(self.sessions.get(session_id).cloned())
    }
}

/// Role table backed by a config map.
pub struct StaticRoleMapping {
    roles: HashMap<String, Vec<String>>,
}

impl StaticRoleMapping {
    #[must_use]
    pub fn new(roles: HashMap<String, Vec<String>>) -> Self {
        Self { roles }
    }
}

impl RoleMapping for StaticRoleMapping {
    fn entitlements_for(&self, role: &str) -> BTreeSet<String> {
        self.roles
            .get(role)
            .map(|entitlements| entitlements.iter().cloned().collect())
            .unwrap_or_default()
    }
}

/// Signer directory backed by a config map.
pub struct StaticSignerDirectory {
    signers: HashMap<String, SubjectRecord>,
}

impl StaticSignerDirectory {
    #[must_use]
    pub fn new(signers: HashMap<String, SubjectRecord>) -> Self {
        Self { signers }
    }
}

#[async_trait]
impl SignerDirectory for StaticSignerDirectory {
    async fn lookup(&self, signer_id: &str) -> Result<Option<SubjectRecord>, LookupError> {
        Ok(self.signers.get(signer_id).cloned())
    }
}

/// HMAC-SHA256 verifier over a shared secret.
///
/// The signed payload is `v0:<timestamp>:<body>` and the wire format is
/// `v0=<hex digest>`.
pub struct SharedSecretVerifier {
    secret: SecretString,
}

impl SharedSecretVerifier {
    #[must_use]
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Produces the wire-format signature for a timestamp and body.
    #[must_use]
    pub fn sign(&self, timestamp: &str, body: &[u8]) -> String {
        let mut mac = self.mac(timestamp, body);
        let digest = mac.finalize_reset().into_bytes();
        format!("v0={}", hex::encode(digest))
    }

    #[allow(clippy::unwrap_used)]
    fn mac(&self, timestamp: &str, body: &[u8]) -> HmacSha256 {
        // HMAC accepts keys of any length.
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes()).unwrap();
        mac.update(format!("v0:{timestamp}:").as_bytes());
        mac.update(body);
        mac
    }
}

impl SignatureVerifier for SharedSecretVerifier {
    fn verify(&self, timestamp: &str, body: &[u8], signature: &str) -> bool {
        let Some(hex_digest) = signature.strip_prefix("v0=") else {
            return false;
        };
        let Ok(expected) = hex::decode(hex_digest) else {
            return false;
        };
        self.mac(timestamp, body).verify_slice(&expected).is_ok()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn verifier() -> SharedSecretVerifier {
        SharedSecretVerifier::new(SecretString::from("secret"))
    }

    #[test]
    fn sign_verify_round_trip() {
        let v = verifier();
        let sig = v.sign("1700000000", b"payload");
        assert!(sig.starts_with("v0="));
        assert!(v.verify("1700000000", b"payload", &sig));
    }

    #[test]
    fn verify_rejects_wrong_body() {
        let v = verifier();
        let sig = v.sign("1700000000", b"payload");
        assert!(!v.verify("1700000000", b"other", &sig));
    }

    #[test]
    fn verify_rejects_wrong_timestamp() {
        let v = verifier();
        let sig = v.sign("1700000000", b"payload");
        assert!(!v.verify("1700000001", b"payload", &sig));
    }

    #[test]
    fn verify_rejects_unknown_scheme() {
        assert!(!verifier().verify("1700000000", b"payload", "v1=abcd"));
    }

    #[test]
    fn verify_rejects_non_hex() {
        assert!(!verifier().verify("1700000000", b"payload", "v0=zzzz"));
    }

    #[test]
    fn role_mapping_returns_empty_for_unknown_role() {
        let mapping = StaticRoleMapping::new(HashMap::new());
        assert!(mapping.entitlements_for("nobody").is_empty());
    }
}
