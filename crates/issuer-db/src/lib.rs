//! # issuer-db
//!
//! Account store implementations of the `AccountRepository` trait defined in
//! `issuer-core`.
//!
//! ## Overview
//!
//! - [`InMemoryAccountRepository`]: a `DashMap` keyed by identity, for tests
//!   and single-process deployments
//! - [`PgAccountRepository`]: PostgreSQL via SQLx, with pool management and
//!   an idempotent schema step
//!
//! ## Usage
//!
//! ```rust,ignore
//! use issuer_db::pool::{create_pool, ensure_schema, PoolConfig};
//! use issuer_db::PgAccountRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PoolConfig {
//!         url: "postgres://localhost/issuer".to_string(),
//!         ..PoolConfig::default()
//!     };
//!     let pool = create_pool(&config).await?;
//!     ensure_schema(&pool).await?;
//!     let accounts = PgAccountRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, ensure_schema, PgPool, PoolConfig};
pub use repositories::{InMemoryAccountRepository, PgAccountRepository};
