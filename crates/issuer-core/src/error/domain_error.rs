//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::IdentityError;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid identity: {0}")]
    InvalidIdentity(#[from] IdentityError),

    #[error("Credential hash must not be empty")]
    EmptyCredentialHash,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Account already exists: {0}")]
    AccountConflict(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidIdentity(_) => "INVALID_IDENTITY",
            Self::EmptyCredentialHash => "EMPTY_CREDENTIAL_HASH",
            Self::AccountConflict(_) => "ACCOUNT_CONFLICT",
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidIdentity(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AccountConflict(_))
    }
}
