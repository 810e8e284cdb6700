//! # EntiDoc Testkit
//!
//! Test utilities for EntiDoc.
//!
//! This crate provides:
//! - Fixture entity types covering each identity configuration
//! - Populated in-memory stores
//! - Property-based test generators using proptest
//! - Tracing setup for tests and benches
//!
//! ## Usage
//!
//! ```rust,ignore
//! use entidoc_testkit::prelude::*;
//!
//! #[test]
//! fn roundtrip() {
//!     init_tracing();
//!     let store = scenarios::people_store(3);
//!     // ... write and read documents
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::init_tracing;
}

pub use fixtures::*;
pub use generators::*;

/// Installs a test tracing subscriber filtered by `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
