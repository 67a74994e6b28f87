//! Config-backed implementations of the lookup traits.

pub mod static_tables;
