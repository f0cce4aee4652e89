//! Auth types shared across YaMDb crates.
//!
//! Provides JWT issue/validation and the `Identity` bearer-token extractor.

pub mod identity;
pub mod token;
