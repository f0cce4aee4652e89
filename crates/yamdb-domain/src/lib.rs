//! Domain types shared across YaMDb crates.
//!
//! This crate contains only pure types with no framework dependencies:
//! roles, pagination, field validation and the access-control policy.

pub mod pagination;
pub mod policy;
pub mod user;
pub mod validation;
