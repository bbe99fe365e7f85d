//! Password reset notification hook

use async_trait::async_trait;
use issuer_core::Account;
use tracing::info;

use super::error::ServiceResult;

/// Receives password reset requests for accounts that exist
///
/// Only called for registered identities; the caller's response never
/// reveals whether it ran.
#[async_trait]
pub trait PasswordResetNotifier: Send + Sync {
    async fn notify(&self, account: &Account) -> ServiceResult<()>;
}

/// Notifier that records the request in the log and sends nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingResetNotifier;

#[async_trait]
impl PasswordResetNotifier for LoggingResetNotifier {
    async fn notify(&self, account: &Account) -> ServiceResult<()> {
        info!(identity = %account.identity, "Password reset requested");
        Ok(())
    }
}
