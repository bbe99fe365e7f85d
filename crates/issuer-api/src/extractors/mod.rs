//! Axum extractors for request handling

mod auth;
mod validated;

pub use auth::BearerToken;
pub use validated::{TokenFormBody, ValidatedJson};
