//! Test utilities for Encore services.
//!
//! Import in `#[cfg(test)]` blocks and `tests/` only, never in production code.

pub mod auth;
