//! # issuer-common
//!
//! Shared utilities including configuration, error handling, credential
//! hashing, token issuance, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{AccessToken, Claims, JwtService, PasswordService, TOKEN_TYPE_BEARER};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    PasswordConfig, RateLimitConfig, ServerConfig, StoreBackend, StoreConfig,
};
pub use error::AppError;
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
