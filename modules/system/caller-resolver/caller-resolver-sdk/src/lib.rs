#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! SDK for the caller resolver.
//!
//! Defines the polymorphic [`CredentialAdapter`] contract that every
//! authentication method implements, the read-only [`CallerRequest`] view
//! adapters consume, and the pluggable lookup capabilities (session store,
//! role mapping, signer directory, signature verification) that let
//! production backends replace the static tables without touching the
//! resolution logic.

pub mod api;
pub mod error;
pub mod lookup;
pub mod models;

pub use api::CredentialAdapter;
pub use error::{AdapterError, LookupError};
pub use lookup::{RoleMapping, SessionStore, SignatureVerifier, SignerDirectory};
pub use models::{CallerRequest, SubjectRecord};
