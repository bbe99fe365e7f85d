//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    PasswordConfig, RateLimitConfig, ServerConfig, StoreBackend, StoreConfig,
    MAX_ACCESS_TOKEN_EXPIRY, MIN_JWT_SECRET_LEN,
};
