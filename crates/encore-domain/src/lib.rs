//! Domain types shared across Encore crates.
//!
//! This crate contains only pure types and pure functions with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod genre;
pub mod pagination;
pub mod policy;
pub mod recommendation;
pub mod user;
