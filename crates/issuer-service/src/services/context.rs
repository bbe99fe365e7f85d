//! Service context - dependency container for services
//!
//! Holds the account store, the credential hasher, the token codec and the
//! reset notifier. Cheap to clone; every field is shared.

use std::sync::Arc;

use issuer_common::{JwtService, PasswordService};
use issuer_core::AccountRepository;

use super::error::{ServiceError, ServiceResult};
use super::notifier::{LoggingResetNotifier, PasswordResetNotifier};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    account_repo: Arc<dyn AccountRepository>,
    jwt_service: Arc<JwtService>,
    password_service: Arc<PasswordService>,
    reset_notifier: Arc<dyn PasswordResetNotifier>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        account_repo: Arc<dyn AccountRepository>,
        jwt_service: Arc<JwtService>,
        password_service: Arc<PasswordService>,
        reset_notifier: Arc<dyn PasswordResetNotifier>,
    ) -> Self {
        Self {
            account_repo,
            jwt_service,
            password_service,
            reset_notifier,
        }
    }

    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    /// Get the account store
    pub fn account_repo(&self) -> &dyn AccountRepository {
        self.account_repo.as_ref()
    }

    /// Get the token codec
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the credential hasher
    pub fn password_service(&self) -> &PasswordService {
        self.password_service.as_ref()
    }

    /// Get the password reset notifier
    pub fn reset_notifier(&self) -> &dyn PasswordResetNotifier {
        self.reset_notifier.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("account_repo", &"dyn AccountRepository")
            .field("jwt_service", &self.jwt_service)
            .field("password_service", &"PasswordService")
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
///
/// The account store and token codec are required. The hasher defaults to
/// OWASP parameters and the notifier to [`LoggingResetNotifier`].
#[derive(Default)]
pub struct ServiceContextBuilder {
    account_repo: Option<Arc<dyn AccountRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    password_service: Option<Arc<PasswordService>>,
    reset_notifier: Option<Arc<dyn PasswordResetNotifier>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account_repo(mut self, repo: Arc<dyn AccountRepository>) -> Self {
        self.account_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn password_service(mut self, service: Arc<PasswordService>) -> Self {
        self.password_service = Some(service);
        self
    }

    pub fn reset_notifier(mut self, notifier: Arc<dyn PasswordResetNotifier>) -> Self {
        self.reset_notifier = Some(notifier);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if a required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.account_repo
                .ok_or_else(|| ServiceError::validation("account_repo is required"))?,
            self.jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            self.password_service
                .unwrap_or_else(|| Arc::new(PasswordService::new())),
            self.reset_notifier
                .unwrap_or_else(|| Arc::new(LoggingResetNotifier)),
        ))
    }
}
