//! Request DTOs for API endpoints
//!
//! All JSON request DTOs implement `Deserialize` and `Validate`. Debug output
//! never includes passwords.

use serde::Deserialize;
use std::fmt;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// Account registration request
#[derive(Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 128, message = "Password must be 1-128 characters"))]
    pub password: String,
}

/// Login request
#[derive(Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 128, message = "Password must be 1-128 characters"))]
    pub password: String,
}

/// OAuth2 password-grant form (`application/x-www-form-urlencoded`)
///
/// `username` carries the email. Extra OAuth2 fields such as `grant_type`
/// and `scope` are accepted and ignored. The username is not format-checked
/// so a non-email identity fails like any other bad login.
#[derive(Clone, Deserialize, Validate)]
pub struct TokenForm {
    pub username: String,

    #[validate(length(min = 1, max = 128, message = "Password must be 1-128 characters"))]
    pub password: String,
}

impl From<TokenForm> for LoginRequest {
    fn from(form: TokenForm) -> Self {
        Self {
            email: form.username,
            password: form.password,
        }
    }
}

/// Password reset request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PasswordResetRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Change the caller's password
#[derive(Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, max = 128, message = "Password must be 1-128 characters"))]
    pub current_password: String,

    #[validate(length(min = 1, max = 128, message = "Password must be 1-128 characters"))]
    pub new_password: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for TokenForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenForm")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangePasswordRequest").finish_non_exhaustive()
    }
}
