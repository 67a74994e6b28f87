#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
pub mod principal;

pub use principal::{AuthMethod, AuthStrength, Principal, PrincipalBuilder};
