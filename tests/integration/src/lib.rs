//! Integration test utilities for the credential issuer
//!
//! Spawns the real Axum application on an ephemeral port and drives it over
//! HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
