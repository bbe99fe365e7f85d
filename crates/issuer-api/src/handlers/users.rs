//! User handlers

use axum::{extract::State, Json};
use issuer_service::dto::AccountResponse;
use issuer_service::AuthService;

use crate::extractors::BearerToken;
use crate::response::ApiResult;
use crate::state::AppState;

/// Get the account the bearer token belongs to
///
/// GET /users/me
pub async fn get_current_user(
    State(state): State<AppState>,
    token: BearerToken,
) -> ApiResult<Json<AccountResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.who_am_i(token.as_str()).await?;
    Ok(Json(response))
}
