//! # issuer-service
//!
//! Application layer: identity resolution, the authentication use cases,
//! and the DTOs exchanged with the HTTP layer.

pub mod dto;
pub mod services;

pub use services::{
    AuthService, IdentityResolver, LoggingResetNotifier, PasswordResetNotifier, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult,
};
