//! Account entity <-> model mapper

use issuer_core::{Account, DomainError, Identity};

use crate::models::AccountModel;

impl TryFrom<AccountModel> for Account {
    type Error = DomainError;

    fn try_from(model: AccountModel) -> Result<Self, Self::Error> {
        if model.password_hash.is_empty() {
            return Err(DomainError::EmptyCredentialHash);
        }

        Ok(Account {
            identity: Identity::parse(model.identity)?,
            password_hash: model.password_hash,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
