//! Shared helpers for the EntiDoc benchmarks.

#![warn(missing_docs)]

pub mod utils;
