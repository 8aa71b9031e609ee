//! Auth types shared across Encore crates.
//!
//! Provides the session token service and `Authorization: Bearer` parsing.

pub mod bearer;
pub mod token;
