//! Shared utilities.
//!
//! Filesystem helpers and test doubles.

pub mod fs;

#[cfg(test)]
pub mod testutil;
