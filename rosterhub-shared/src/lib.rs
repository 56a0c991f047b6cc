//! # Rosterhub Shared Library
//!
//! This crate contains the data layer shared by the rosterhub API server
//! and its operational binaries.
//!
//! ## Module Organization
//!
//! - `validation`: Pure field normalization and validation (mobile, PAN)
//! - `models`: Database models for user records and managers
//! - `db`: Connection pool and migration runner

pub mod db;
pub mod models;
pub mod validation;

/// Current version of the rosterhub shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
