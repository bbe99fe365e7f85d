//! Business logic services
//!
//! Services borrow a [`ServiceContext`] for the duration of one request and
//! keep no state of their own between requests.

pub mod auth;
pub mod context;
pub mod error;
pub mod identity;
pub mod notifier;

// Re-export all services for convenience
pub use auth::{AuthService, REGISTERED_MESSAGE, RESET_REQUESTED_MESSAGE};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use identity::IdentityResolver;
pub use notifier::{LoggingResetNotifier, PasswordResetNotifier};
