//! PostgreSQL implementation of AccountRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use issuer_core::{Account, AccountRepository, AccountUpdate, Identity, RepoResult};

use crate::models::AccountModel;

use super::error::{account_conflict, map_db_error, map_unique_violation};

/// PostgreSQL implementation of AccountRepository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    /// Create a new PgAccountRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    #[instrument(skip_all, fields(identity = %identity))]
    async fn find(&self, identity: &Identity) -> RepoResult<Option<Account>> {
        let result = sqlx::query_as::<_, AccountModel>(
            r"
            SELECT identity, password_hash, is_active, created_at, updated_at
            FROM accounts
            WHERE identity = $1
            ",
        )
        .bind(identity.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Account::try_from).transpose()
    }

    #[instrument(skip_all, fields(identity = %account.identity))]
    async fn insert(&self, account: Account) -> RepoResult<Account> {
        // The primary key makes this the atomic check-and-insert: a losing
        // concurrent insert returns no row instead of raising.
        let inserted = sqlx::query_as::<_, AccountModel>(
            r"
            INSERT INTO accounts (identity, password_hash, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (identity) DO NOTHING
            RETURNING identity, password_hash, is_active, created_at, updated_at
            ",
        )
        .bind(account.identity.as_str())
        .bind(&account.password_hash)
        .bind(account.is_active)
        .bind(account.created_at)
        .bind(account.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || account_conflict(&account.identity)))?;

        match inserted {
            Some(model) => Account::try_from(model),
            None => {
                debug!("Identity already taken");
                Err(account_conflict(&account.identity))
            }
        }
    }

    #[instrument(skip_all, fields(identity = %identity))]
    async fn update(
        &self,
        identity: &Identity,
        update: AccountUpdate,
    ) -> RepoResult<Option<Account>> {
        update.check()?;

        // Rolled back on drop if any step below returns early
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let current = sqlx::query_as::<_, AccountModel>(
            r"
            SELECT identity, password_hash, is_active, created_at, updated_at
            FROM accounts
            WHERE identity = $1
            FOR UPDATE
            ",
        )
        .bind(identity.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let Some(current) = current else {
            return Ok(None);
        };

        let mut account = Account::try_from(current)?;
        account.apply(&update)?;

        let updated = sqlx::query_as::<_, AccountModel>(
            r"
            UPDATE accounts
            SET password_hash = $2, is_active = $3, updated_at = $4
            WHERE identity = $1
            RETURNING identity, password_hash, is_active, created_at, updated_at
            ",
        )
        .bind(identity.as_str())
        .bind(&account.password_hash)
        .bind(account.is_active)
        .bind(account.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Account::try_from(updated).map(Some)
    }

    #[instrument(skip(self))]
    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}
