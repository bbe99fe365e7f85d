//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{Account, AccountUpdate};
use crate::error::DomainError;
use crate::value_objects::Identity;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Account store
///
/// The store exclusively owns account records. Implementations must make
/// `insert` an atomic check-and-insert: when two callers insert the same
/// identity concurrently, exactly one succeeds and the other receives
/// `DomainError::AccountConflict`.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by identity
    async fn find(&self, identity: &Identity) -> RepoResult<Option<Account>>;

    /// Insert a new account, failing with `AccountConflict` if the identity is taken
    async fn insert(&self, account: Account) -> RepoResult<Account>;

    /// Apply a partial update, returning the updated account or `None` if absent
    async fn update(&self, identity: &Identity, update: AccountUpdate)
        -> RepoResult<Option<Account>>;

    /// Check that the backing storage is reachable
    async fn ping(&self) -> RepoResult<()>;
}
