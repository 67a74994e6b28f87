//! Polymorphic credential adapter contract.
//!
//! Each authentication method (session cookie, OAuth bearer token,
//! third-party-signed request) implements this trait; the resolution chain
//! holds an ordered sequence of trait objects and applies first-match-wins.

use async_trait::async_trait;
use caller_security::Principal;

use crate::error::AdapterError;
use crate::models::CallerRequest;

/// A method-specific component converting raw credentials into a
/// [`Principal`].
///
/// Adapters authenticate only; they never make authorization decisions.
#[async_trait]
pub trait CredentialAdapter: Send + Sync {
    /// Stable adapter name used in logs.
    fn name(&self) -> &'static str;

    /// Pure presence check: does the request carry this method's
    /// distinguishing markers (a named cookie, a `Bearer` header, a
    /// signature/timestamp header pair)?
    ///
    /// Must not perform any verification.
    fn applies(&self, request: &CallerRequest) -> bool;

    /// Validate the credentials and resolve the caller.
    ///
    /// Returns `Ok(None)` when the credential is invalid, expired, or
    /// unknown, including malformed input. That outcome is
    /// non-exceptional; the chain simply moves on to the next adapter.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] only for genuine internal faults (e.g. a
    /// failing session-store backend). The chain logs and suppresses these.
    async fn resolve(&self, request: &CallerRequest) -> Result<Option<Principal>, AdapterError>;
}
