//! Test support utilities for ww integration tests
//!
//! This crate provides shared test helpers and utilities for integration tests.
//! It's designed to be used only during development and testing, not published.

pub mod test_env;

// Re-export commonly used items for convenience
pub use test_env::CliTestEnvironment;
