//! Test utilities for YaMDb services.
//!
//! Provides `MockAuth` for minting bearer headers.
//! Import from dev-dependencies only, never in production code.

pub mod auth;
