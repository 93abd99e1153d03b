//! Shared utilities.
//!
//! Currently only test helpers used across the crate's unit tests.

#[cfg(test)]
pub mod testutil;
