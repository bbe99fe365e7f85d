//! JWT utilities for authentication
//!
//! Stateless, signed, time-bound identity claims. Tokens are signed with
//! HS256 using a single process-wide secret; nothing about an issued token is
//! stored, so changing the secret invalidates every outstanding token.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::AppError;

/// Token type reported to clients alongside an access token
pub const TOKEN_TYPE_BEARER: &str = "bearer";

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account identity)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Unique token id
    pub jti: String,
}

impl Claims {
    /// Check if the token is expired
    ///
    /// A token is valid strictly before `exp`.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Access token handed out after a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// JWT service for issuing and validating tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_token_expiry: i64,
}

impl JwtService {
    /// Create a new JWT service with the given secret and access token lifetime in seconds
    #[must_use]
    pub fn new(secret: &str, access_token_expiry: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            access_token_expiry,
        }
    }

    /// Issue a signed token for `subject` that expires after `ttl`
    ///
    /// # Errors
    /// Returns `AppError::InvalidInput` for an empty subject or a ttl under one
    /// second, and `AppError::Internal` if encoding fails
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<String, AppError> {
        if subject.is_empty() {
            return Err(AppError::InvalidInput("token subject must not be empty".to_string()));
        }
        if ttl.num_seconds() <= 0 {
            return Err(AppError::InvalidInput("token ttl must be positive".to_string()));
        }

        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::InvalidInput("token ttl is out of range".to_string()))?;
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode JWT: {e}")))
    }

    /// Issue an access token with the configured lifetime
    ///
    /// # Errors
    /// Returns `AppError::InvalidInput` if the configured lifetime is out of
    /// range, or an error if token encoding fails
    pub fn issue_access_token(&self, subject: &str) -> Result<AccessToken, AppError> {
        let ttl = Duration::try_seconds(self.access_token_expiry).ok_or_else(|| {
            AppError::InvalidInput("access token expiry is out of range".to_string())
        })?;
        let access_token = self.issue(subject, ttl)?;

        Ok(AccessToken {
            access_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.access_token_expiry,
        })
    }

    /// Validate a token and return its claims
    ///
    /// Pure: checks the signature and expiry only.
    ///
    /// # Errors
    /// - `AppError::InvalidSignature` if the signature or algorithm does not match
    /// - `AppError::TokenExpired` once `exp` has been reached
    /// - `AppError::MalformedToken` for anything that cannot be decoded
    pub fn validate(&self, token: &str) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!(error = %e, "Token rejected");
                match e.kind() {
                    ErrorKind::ExpiredSignature => AppError::TokenExpired,
                    ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                        AppError::InvalidSignature
                    }
                    _ => AppError::MalformedToken,
                }
            })?;

        let claims = token_data.claims;
        if claims.sub.is_empty() {
            return Err(AppError::MalformedToken);
        }
        if claims.is_expired() {
            return Err(AppError::TokenExpired);
        }

        Ok(claims)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access_token_expiry)
            .finish_non_exhaustive()
    }
}
