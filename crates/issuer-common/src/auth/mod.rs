//! Credential hashing and token issuance

mod jwt;
mod password;

pub use jwt::{AccessToken, Claims, JwtService, TOKEN_TYPE_BEARER};
pub use password::{PasswordService, DEFAULT_ITERATIONS, DEFAULT_MEMORY_KIB, DEFAULT_PARALLELISM};
