//! Account database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the accounts table
#[derive(Clone, FromRow)]
pub struct AccountModel {
    pub identity: String,
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Debug for AccountModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountModel")
            .field("identity", &self.identity)
            .field("is_active", &self.is_active)
            .finish_non_exhaustive()
    }
}
