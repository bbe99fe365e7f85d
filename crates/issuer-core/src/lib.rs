//! # issuer-core
//!
//! Domain layer containing the account entity, the identity value object,
//! and the account store trait.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Account, AccountUpdate};
pub use error::DomainError;
pub use traits::{AccountRepository, RepoResult};
pub use value_objects::{Identity, IdentityError};
