//! Server setup and initialization
//!
//! Builds the account store selected by configuration, wires the service
//! context, and serves the Axum application.

use std::sync::Arc;

use axum::Router;
use issuer_common::{AppConfig, AppError, JwtService, PasswordService, StoreBackend};
use issuer_core::AccountRepository;
use issuer_db::{
    create_pool, ensure_schema, InMemoryAccountRepository, PgAccountRepository, PoolConfig,
};
use issuer_service::ServiceContext;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// # Errors
/// Returns `AppError::Config` if the rate limit configuration is unusable.
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;
    let health = apply_middleware(health_routes());

    Ok(api.merge(health).with_state(state))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let account_repo = create_account_repo(&config).await?;

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));

    let password_service = Arc::new(PasswordService::with_params(
        config.password.memory_kib,
        config.password.iterations,
        config.password.parallelism,
    )?);

    let service_context = ServiceContext::builder()
        .account_repo(account_repo)
        .jwt_service(jwt_service)
        .password_service(password_service)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

async fn create_account_repo(config: &AppConfig) -> Result<Arc<dyn AccountRepository>, AppError> {
    match config.store.backend {
        StoreBackend::Memory => {
            info!("Using in-memory account store");
            Ok(Arc::new(InMemoryAccountRepository::new()))
        }
        StoreBackend::Postgres => {
            let database = config.store.database.as_ref().ok_or_else(|| {
                AppError::Config("DATABASE_URL is required for the postgres backend".to_string())
            })?;

            info!("Connecting to PostgreSQL...");
            let pool = create_pool(&PoolConfig::from(database))
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            ensure_schema(&pool)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            info!("PostgreSQL connection established");

            Ok(Arc::new(PgAccountRepository::new(pool)))
        }
    }
}

/// Serve the application on an already bound listener until Ctrl+C
pub async fn run_server(app: Router, listener: TcpListener) -> Result<(), AppError> {
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::Config(format!("Failed to read local address: {e}")))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    run_server(app, listener).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
