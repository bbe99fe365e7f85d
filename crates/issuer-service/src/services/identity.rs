//! Identity resolution
//!
//! Turns a presented bearer token into the live account it names. Session-less:
//! the token is validated on its own, then the subject is looked up in the
//! store on every call.

use tracing::{debug, instrument};

use issuer_common::AppError;
use issuer_core::{Account, Identity};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Resolves bearer tokens to accounts
pub struct IdentityResolver<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> IdentityResolver<'a> {
    /// Create a new IdentityResolver
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Resolve a token to its account
    ///
    /// Inactive accounts resolve; deciding what they may do is left to the caller.
    ///
    /// # Errors
    /// - `AppError::TokenExpired`, `AppError::InvalidSignature` or
    ///   `AppError::MalformedToken` straight from token validation
    /// - `ServiceError::NotFound` if the subject has no account
    #[instrument(skip_all)]
    pub async fn resolve(&self, token: &str) -> ServiceResult<Account> {
        let claims = self.ctx.jwt_service().validate(token)?;

        let identity = Identity::parse(claims.sub).map_err(|e| {
            debug!(error = %e, "Token subject is not an identity");
            AppError::MalformedToken
        })?;

        self.ctx
            .account_repo()
            .find(&identity)
            .await?
            .ok_or_else(|| ServiceError::not_found("Account", identity.as_str()))
    }
}
