//! Test fixtures and data generators

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Unique email, so tests sharing a durable store never collide
pub fn unique_email() -> String {
    format!("user{}-{}@example.com", std::process::id(), unique_suffix())
}

/// Registration and login body
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn unique() -> Self {
        Self {
            email: unique_email(),
            password: "TestPass123!".to_string(),
        }
    }

    pub fn with_password(&self, password: &str) -> Self {
        Self {
            email: self.email.clone(),
            password: password.to_string(),
        }
    }
}

/// Forgot-password body
#[derive(Debug, Serialize)]
pub struct ForgotPassword {
    pub email: String,
}

/// Change-password body
#[derive(Debug, Serialize)]
pub struct ChangePassword {
    pub current_password: String,
    pub new_password: String,
}

/// `{message}` reply
#[derive(Debug, PartialEq, Eq, Deserialize)]
pub struct Message {
    pub message: String,
}

/// Token reply from `/auth/login` and `/auth/token`
#[derive(Debug, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// `/users/me` reply
#[derive(Debug, Deserialize)]
pub struct Me {
    pub email: String,
}

/// Error envelope
#[derive(Debug, PartialEq, Eq, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, PartialEq, Eq, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
