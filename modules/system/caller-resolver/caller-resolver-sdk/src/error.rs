//! Error types for the caller resolver SDK.

use thiserror::Error;

/// Failure of an external lookup capability (session store, signer
/// directory).
///
/// Distinct from "record not found": lookups signal absence with
/// `Ok(None)` and reserve this error for infrastructure faults.
#[derive(Debug, Error)]
#[error("lookup failed: {0}")]
pub struct LookupError(pub String);

/// Internal fault inside a credential adapter.
///
/// Invalid, expired, or unknown credentials are *not* errors; adapters
/// report those as `Ok(None)`. This type covers genuinely unexpected faults
/// (backend lookup failures, misconfiguration), which the resolution chain
/// logs and suppresses so a single faulting adapter never aborts resolution.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// An external lookup capability failed.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}
