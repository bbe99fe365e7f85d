//! Response DTOs for API endpoints

use chrono::{DateTime, Utc};
use serde::Serialize;

use issuer_common::AccessToken;
use issuer_core::Account;

// ============================================================================
// Auth Responses
// ============================================================================

/// Plain acknowledgement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Issued access token
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl From<AccessToken> for TokenResponse {
    fn from(token: AccessToken) -> Self {
        Self {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
        }
    }
}

/// Public view of an account: the email and nothing else
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountResponse {
    pub email: String,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            email: account.identity.to_string(),
        }
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub store: String,
}

impl ReadinessResponse {
    pub fn ready(store_healthy: bool) -> Self {
        Self {
            status: if store_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                store: if store_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use issuer_core::Identity;

    #[test]
    fn test_account_response_has_only_email() {
        let account = Account::new(
            Identity::parse("a@x.com").unwrap(),
            "$argon2id$secret".to_string(),
        )
        .unwrap();

        let json = serde_json::to_value(AccountResponse::from(&account)).unwrap();
        assert_eq!(json, serde_json::json!({ "email": "a@x.com" }));
    }

    #[test]
    fn test_token_response_serialization() {
        let response = TokenResponse::from(AccessToken {
            access_token: "abc".to_string(),
            token_type: "bearer".to_string(),
            expires_in: 1800,
        });

        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["access_token"], "abc");
        assert_eq!(json["token_type"], "bearer");
        assert_eq!(json["expires_in"], 1800);
    }

    #[test]
    fn test_health_response() {
        let health = HealthResponse::healthy();
        assert_eq!(health.status, "healthy");
    }

    #[test]
    fn test_readiness_response() {
        let ready = ReadinessResponse::ready(true);
        assert!(ready.is_ready());
        assert_eq!(ready.checks.store, "healthy");

        let not_ready = ReadinessResponse::ready(false);
        assert_eq!(not_ready.status, "not_ready");
        assert_eq!(not_ready.checks.store, "unhealthy");
    }
}
