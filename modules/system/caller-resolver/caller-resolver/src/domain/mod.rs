//! Credential adapters and the resolution chain.

pub mod chain;
pub mod cookie;
pub mod oauth;
pub mod signed;

use caller_resolver_sdk::SubjectRecord;
use caller_security::{AuthMethod, AuthStrength, Principal};

/// Builds a principal from a looked-up subject record.
fn subject_principal(record: SubjectRecord, method: AuthMethod, strength: AuthStrength) -> Principal {
    Principal::builder()
        .id(record.principal_id)
        .maybe_tenant(record.tenant_id)
        .method(method)
        .strength(strength)
        .entitlements(record.entitlements)
        .build()
}
