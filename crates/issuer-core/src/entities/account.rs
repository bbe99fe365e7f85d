//! Account entity - a registered identity and its credential hash

use chrono::{DateTime, Utc};
use std::fmt;

use crate::error::DomainError;
use crate::value_objects::Identity;

/// Account entity
///
/// The credential hash is opaque hasher output and is never empty once the
/// account exists. It is left out of the `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    pub identity: Identity,
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new active account
    ///
    /// # Errors
    /// Returns `DomainError::EmptyCredentialHash` if `password_hash` is empty
    pub fn new(identity: Identity, password_hash: String) -> Result<Self, DomainError> {
        if password_hash.is_empty() {
            return Err(DomainError::EmptyCredentialHash);
        }

        let now = Utc::now();
        Ok(Self {
            identity,
            password_hash,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Check if the account may log in
    #[inline]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Apply a partial update in place
    ///
    /// # Errors
    /// Returns `DomainError::EmptyCredentialHash` if the update carries an empty hash.
    /// The account is left untouched in that case.
    pub fn apply(&mut self, update: &AccountUpdate) -> Result<(), DomainError> {
        update.check()?;

        if let Some(hash) = &update.password_hash {
            self.password_hash.clone_from(hash);
        }
        if let Some(active) = update.is_active {
            self.is_active = active;
        }
        self.updated_at = Utc::now();

        Ok(())
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("identity", &self.identity)
            .field("is_active", &self.is_active)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish_non_exhaustive()
    }
}

/// Fields that may change on an existing account
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AccountUpdate {
    pub password_hash: Option<String>,
    pub is_active: Option<bool>,
}

impl AccountUpdate {
    /// Update that replaces the credential hash
    pub fn password_hash(hash: impl Into<String>) -> Self {
        Self {
            password_hash: Some(hash.into()),
            ..Default::default()
        }
    }

    /// Update that toggles the active flag
    pub fn active(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Default::default()
        }
    }

    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.password_hash.is_none() && self.is_active.is_none()
    }

    /// Reject updates that would break account invariants
    ///
    /// # Errors
    /// Returns `DomainError::EmptyCredentialHash` for an empty replacement hash
    pub fn check(&self) -> Result<(), DomainError> {
        match &self.password_hash {
            Some(hash) if hash.is_empty() => Err(DomainError::EmptyCredentialHash),
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for AccountUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountUpdate")
            .field("password_hash", &self.password_hash.as_ref().map(|_| "<redacted>"))
            .field("is_active", &self.is_active)
            .finish()
    }
}
