#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Centralized authorization.
//!
//! The [`Authorizer`] is the single place where authorization decisions are
//! made: operations never check permissions themselves. Decisions are pure
//! computation over the caller's [`caller_security::Principal`] and the
//! operation's [`OperationPolicy`], looked up in a snapshot-swapped
//! [`PolicyRegistry`].

pub mod authorizer;
pub mod policy;

pub use authorizer::{AccessDenied, Authorizer, DenyReason, MissingPolicy};
pub use policy::{OperationPolicy, PolicyRegistry};
