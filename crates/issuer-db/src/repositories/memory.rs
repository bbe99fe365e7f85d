//! In-memory implementation of AccountRepository

use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use std::sync::Arc;
use tracing::{debug, instrument};

use issuer_core::{Account, AccountRepository, AccountUpdate, Identity, RepoResult};

use super::error::account_conflict;

/// Account store backed by a concurrent hash map
///
/// Cloning shares the same underlying map. Shard locks are only held for the
/// duration of a single map operation, never across an await point.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<DashMap<Identity, Account>>,
}

impl InMemoryAccountRepository {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// True when no account is stored
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    #[instrument(skip_all, fields(identity = %identity))]
    async fn find(&self, identity: &Identity) -> RepoResult<Option<Account>> {
        Ok(self.accounts.get(identity).map(|entry| entry.value().clone()))
    }

    #[instrument(skip_all, fields(identity = %account.identity))]
    async fn insert(&self, account: Account) -> RepoResult<Account> {
        match self.accounts.entry(account.identity.clone()) {
            Entry::Occupied(_) => {
                debug!("Identity already taken");
                Err(account_conflict(&account.identity))
            }
            Entry::Vacant(slot) => {
                slot.insert(account.clone());
                Ok(account)
            }
        }
    }

    #[instrument(skip_all, fields(identity = %identity))]
    async fn update(
        &self,
        identity: &Identity,
        update: AccountUpdate,
    ) -> RepoResult<Option<Account>> {
        let Some(mut entry) = self.accounts.get_mut(identity) else {
            return Ok(None);
        };

        entry.value_mut().apply(&update)?;
        Ok(Some(entry.value().clone()))
    }

    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}
