//! Service plumbing shared by Encore binaries: env config loading, the JSON error
//! payload, health probes, request ids and tracing setup.

pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
