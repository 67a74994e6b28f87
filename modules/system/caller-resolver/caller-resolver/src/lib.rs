#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Credential resolution module.
//!
//! Turns an incoming request's credential material (session cookies, OAuth
//! bearer tokens, third-party request signatures) into a single canonical
//! [`caller_security::Principal`]. Adapters are tried in a fixed order and
//! the first one that yields a principal wins; when nothing matches the
//! caller is anonymous.

pub mod config;
pub mod domain;
pub mod infra;

pub use config::ResolverConfig;
pub use domain::chain::ResolutionChain;
