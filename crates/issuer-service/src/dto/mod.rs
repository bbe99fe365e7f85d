//! Data transfer objects for API requests and responses
//!
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs

pub mod requests;
pub mod responses;

pub use requests::{
    ChangePasswordRequest, LoginRequest, PasswordResetRequest, RegisterRequest, TokenForm,
};
pub use responses::{
    AccountResponse, HealthChecks, HealthResponse, MessageResponse, ReadinessResponse,
    TokenResponse,
};
