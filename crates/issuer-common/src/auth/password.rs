//! Password hashing and verification utilities
//!
//! Uses Argon2id for secure password hashing (OWASP recommended).
//! Hashes are PHC strings, so the salt and cost parameters travel with the
//! hash and verification needs nothing else.

use std::sync::{Arc, OnceLock};

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use tracing::{error, warn};

use crate::error::AppError;

/// Default Argon2 memory cost in KiB (19 MiB)
pub const DEFAULT_MEMORY_KIB: u32 = 19_456;

/// Default Argon2 iteration count
pub const DEFAULT_ITERATIONS: u32 = 2;

/// Default Argon2 lane count
pub const DEFAULT_PARALLELISM: u32 = 1;

const PLACEHOLDER_PASSWORD: &str = "placeholder-password-for-unknown-accounts";

fn hash_with(argon2: &Argon2<'_>, password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

fn verify_with(argon2: &Argon2<'_>, password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(error = %e, "Stored password hash is not a valid PHC string");
            return false;
        }
    };

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Password service for dependency injection
///
/// Holds a configured Argon2id instance. The `*_blocking` methods move the
/// work onto tokio's blocking pool so hashing never stalls the async workers.
#[derive(Debug, Clone)]
pub struct PasswordService {
    argon2: Argon2<'static>,
    placeholder: Arc<OnceLock<String>>,
}

impl Default for PasswordService {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordService {
    /// Create a password service with the default (OWASP) parameters
    #[must_use]
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
            placeholder: Arc::new(OnceLock::new()),
        }
    }

    /// Create a password service with explicit cost parameters
    ///
    /// # Errors
    /// Returns `AppError::Config` if Argon2 rejects the parameters
    pub fn with_params(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, AppError> {
        let params = Params::new(memory_kib, iterations, parallelism, None).map_err(|e| {
            error!(error = %e, "Failed to create Argon2 parameters");
            AppError::Config(format!("Invalid password hashing parameters: {e}"))
        })?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            placeholder: Arc::new(OnceLock::new()),
        })
    }

    /// Hash a password
    ///
    /// # Errors
    /// Returns an error if hashing fails
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        hash_with(&self.argon2, password)
    }

    /// Verify a password against a hash, failing closed
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        verify_with(&self.argon2, password, hash)
    }

    /// Hash a password on the blocking thread pool
    ///
    /// # Errors
    /// Returns an error if hashing fails or the blocking task is cancelled
    pub async fn hash_blocking(&self, password: String) -> Result<String, AppError> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.hash(&password))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing task failed: {e}")))?
    }

    /// Verify a password on the blocking thread pool
    ///
    /// A failed or cancelled task counts as a mismatch.
    pub async fn verify_blocking(&self, password: String, hash: String) -> bool {
        let service = self.clone();
        match tokio::task::spawn_blocking(move || service.verify(&password, &hash)).await {
            Ok(valid) => valid,
            Err(e) => {
                error!(error = %e, "Password verification task failed");
                false
            }
        }
    }

    /// Spend the same effort as a real verification, then report a mismatch
    ///
    /// Used when the account does not exist so response time does not reveal it.
    pub async fn verify_placeholder_blocking(&self, password: String) -> bool {
        let service = self.clone();
        let result = tokio::task::spawn_blocking(move || {
            if let Some(hash) = service.placeholder_hash() {
                let _ = service.verify(&password, hash);
            }
        })
        .await;

        if let Err(e) = result {
            error!(error = %e, "Placeholder verification task failed");
        }

        false
    }

    fn placeholder_hash(&self) -> Option<&str> {
        if let Some(hash) = self.placeholder.get() {
            return Some(hash.as_str());
        }

        let hash = self.hash(PLACEHOLDER_PASSWORD).ok()?;
        Some(self.placeholder.get_or_init(|| hash).as_str())
    }
}
