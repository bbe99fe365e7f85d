//! Authentication handlers
//!
//! Endpoints for registration, login, password change and password reset.

use axum::{extract::State, Json};
use issuer_service::dto::{
    ChangePasswordRequest, LoginRequest, MessageResponse, PasswordResetRequest, RegisterRequest,
    TokenResponse,
};
use issuer_service::AuthService;

use crate::extractors::{BearerToken, TokenFormBody, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Register a new account
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<MessageResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(Json(response)))
}

/// Login with email and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// OAuth2 password grant
///
/// POST /auth/token
pub async fn token(
    State(state): State<AppState>,
    TokenFormBody(form): TokenFormBody,
) -> ApiResult<Json<TokenResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(LoginRequest::from(form)).await?;
    Ok(Json(response))
}

/// Request a password reset link
///
/// POST /auth/forgot-password
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<PasswordResetRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.request_password_reset(request).await?;
    Ok(Json(response))
}

/// Change the caller's password
///
/// POST /auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    token: BearerToken,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<NoContent> {
    let service = AuthService::new(state.service_context());
    service.change_password(token.as_str(), request).await?;
    Ok(NoContent)
}
