#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Caller gateway: HTTP surface over the resolution chain and the
//! authorization engine.
//!
//! Every request passes the resolution middleware, which normalizes
//! whatever credentials it carries into a [`caller_security::Principal`];
//! protected operations then make exactly one centralized authorization
//! check before executing.

pub mod api;
pub mod config;
pub mod domain;
pub mod middleware;
pub mod state;

pub use config::GatewayConfig;
pub use state::AppState;
