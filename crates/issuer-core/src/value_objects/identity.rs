//! Identity - the unique, email-shaped name of an account
//!
//! Identities are compared exactly: no case folding or trimming is applied,
//! so `A@x.com` and `a@x.com` name two different accounts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::ValidateEmail;

/// Validated account identity
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity(String);

impl Identity {
    /// Parse and validate an identity
    pub fn parse(value: impl Into<String>) -> Result<Self, IdentityError> {
        let value = value.into();

        if value.is_empty() {
            return Err(IdentityError::Empty);
        }

        if !value.validate_email() {
            return Err(IdentityError::NotEmail);
        }

        Ok(Self(value))
    }

    /// Borrow the identity as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Error when an identity fails validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("identity must not be empty")]
    Empty,

    #[error("identity must be a valid email address")]
    NotEmail,
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Identity {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Identity {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Identity> for String {
    fn from(identity: Identity) -> Self {
        identity.0
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
