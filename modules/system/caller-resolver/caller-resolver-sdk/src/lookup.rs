//! Pluggable external lookup capabilities.
//!
//! Adapters depend on these traits rather than concrete tables, so
//! production backends (session database, identity provider, partner
//! directory, KMS) can be substituted without touching the resolution logic.
//! The static, config-backed implementations live in the `caller-resolver`
//! crate.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::error::LookupError;
use crate::models::SubjectRecord;

/// Session-token lookup, treated as an opaque key → record map.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Look up a session by its opaque token.
    ///
    /// `Ok(None)` means the session is unknown or expired.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the backing store itself fails.
    async fn get(&self, session_id: &str) -> Result<Option<SubjectRecord>, LookupError>;
}

/// Static role-to-entitlement mapping for OAuth claims.
pub trait RoleMapping: Send + Sync {
    /// Entitlements granted by a role. An unmapped role yields the empty
    /// set, not a failure.
    fn entitlements_for(&self, role: &str) -> BTreeSet<String>;
}

/// Directory mapping third-party signer identities to internal subjects.
#[async_trait]
pub trait SignerDirectory: Send + Sync {
    /// Look up a signer identity.
    ///
    /// `Ok(None)` means the signer is valid but unknown; the adapter then
    /// produces a minimally-privileged principal instead of failing.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the backing directory fails.
    async fn lookup(&self, signer_id: &str) -> Result<Option<SubjectRecord>, LookupError>;
}

/// Abstract "verify these bytes" capability for third-party request
/// signatures. Scheme internals are outside the resolver core.
pub trait SignatureVerifier: Send + Sync {
    /// Verify `signature` over the request `timestamp` and raw `body`.
    fn verify(&self, timestamp: &str, body: &[u8], signature: &str) -> bool;
}
