//! Route definitions
//!
//! API routes are mounted under /api/v1; health checks sit at the root.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, health, users};
use crate::state::AppState;

/// Create the API router (health checks excluded so they skip rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Liveness and readiness checks
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new().merge(auth_routes()).merge(user_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/token", post(auth::token))
        .route("/auth/forgot-password", post(auth::forgot_password))
        .route("/auth/change-password", post(auth::change_password))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new().route("/users/me", get(users::get_current_user))
}
