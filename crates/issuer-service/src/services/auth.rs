//! Authentication service
//!
//! Handles registration, login, identity lookup, password reset requests and
//! password changes.

use tracing::{error, info, instrument, warn};

use issuer_common::AppError;
use issuer_core::{Account, AccountUpdate, DomainError, Identity};

use crate::dto::{
    AccountResponse, ChangePasswordRequest, LoginRequest, MessageResponse, PasswordResetRequest,
    RegisterRequest, TokenResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::identity::IdentityResolver;

/// Acknowledgement returned after a successful registration
pub const REGISTERED_MESSAGE: &str = "User successfully registered";

/// Acknowledgement returned for every password reset request
pub const RESET_REQUESTED_MESSAGE: &str =
    "If the email is registered, a password reset link has been sent.";

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new account
    ///
    /// No token is issued; the caller logs in separately.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<MessageResponse> {
        let identity = Identity::parse(request.email).map_err(DomainError::from)?;

        if self.ctx.account_repo().find(&identity).await?.is_some() {
            return Err(already_exists(&identity));
        }

        let password_hash = self
            .ctx
            .password_service()
            .hash_blocking(request.password)
            .await?;

        let account = Account::new(identity, password_hash)?;

        // A concurrent registration may have won since the check above
        let account = self
            .ctx
            .account_repo()
            .insert(account)
            .await
            .map_err(|e| match e {
                DomainError::AccountConflict(identity) => {
                    ServiceError::App(AppError::AlreadyExists(identity))
                }
                other => ServiceError::Domain(other),
            })?;

        info!(identity = %account.identity, "Account registered");

        Ok(MessageResponse::new(REGISTERED_MESSAGE))
    }

    /// Login with email and password
    ///
    /// Unknown identity and wrong password produce the same error, and both
    /// pay for one hash verification.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<TokenResponse> {
        let account = match Identity::parse(request.email) {
            Ok(identity) => self.ctx.account_repo().find(&identity).await?,
            Err(_) => None,
        };

        let passwords = self.ctx.password_service();

        let Some(account) = account else {
            passwords.verify_placeholder_blocking(request.password).await;
            warn!("Login failed: unknown identity");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        };

        if !passwords
            .verify_blocking(request.password, account.password_hash.clone())
            .await
        {
            warn!(identity = %account.identity, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        if !account.is_active() {
            warn!(identity = %account.identity, "Login refused: account inactive");
            return Err(ServiceError::App(AppError::InactiveAccount));
        }

        let token = self
            .ctx
            .jwt_service()
            .issue_access_token(account.identity.as_str())?;

        info!(identity = %account.identity, "Account logged in");

        Ok(TokenResponse::from(token))
    }

    /// Describe the account a token belongs to
    #[instrument(skip_all)]
    pub async fn who_am_i(&self, token: &str) -> ServiceResult<AccountResponse> {
        let account = self.authenticate(token).await?;
        Ok(AccountResponse::from(&account))
    }

    /// Request a password reset
    ///
    /// The reply is identical whether or not the identity is registered.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn request_password_reset(
        &self,
        request: PasswordResetRequest,
    ) -> ServiceResult<MessageResponse> {
        let account = match Identity::parse(request.email) {
            Ok(identity) => self.ctx.account_repo().find(&identity).await?,
            Err(_) => None,
        };

        if let Some(account) = account {
            if let Err(e) = self.ctx.reset_notifier().notify(&account).await {
                error!(error = %e, "Password reset notification failed");
            }
        }

        Ok(MessageResponse::new(RESET_REQUESTED_MESSAGE))
    }

    /// Change the password of the account a token belongs to
    ///
    /// Tokens issued before the change stay valid until they expire.
    #[instrument(skip_all)]
    pub async fn change_password(
        &self,
        token: &str,
        request: ChangePasswordRequest,
    ) -> ServiceResult<()> {
        let account = self.authenticate(token).await?;

        let passwords = self.ctx.password_service();
        if !passwords
            .verify_blocking(request.current_password, account.password_hash.clone())
            .await
        {
            warn!(identity = %account.identity, "Password change refused: wrong current password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        let password_hash = passwords.hash_blocking(request.new_password).await?;

        self.ctx
            .account_repo()
            .update(&account.identity, AccountUpdate::password_hash(password_hash))
            .await?
            .ok_or_else(ServiceError::unauthorized)?;

        info!(identity = %account.identity, "Password changed");

        Ok(())
    }

    /// Resolve a token to an active account
    ///
    /// Every failure collapses to `Unauthorized`; the reason only goes to the log.
    async fn authenticate(&self, token: &str) -> ServiceResult<Account> {
        let account = IdentityResolver::new(self.ctx)
            .resolve(token)
            .await
            .map_err(|e| {
                if e.is_client_error() {
                    warn!(reason = %e, "Token rejected");
                } else {
                    error!(error = %e, "Token resolution failed");
                }
                ServiceError::unauthorized()
            })?;

        if !account.is_active() {
            warn!(identity = %account.identity, "Token rejected: account inactive");
            return Err(ServiceError::unauthorized());
        }

        Ok(account)
    }
}

fn already_exists(identity: &Identity) -> ServiceError {
    ServiceError::App(AppError::AlreadyExists(identity.to_string()))
}
