//! Repository implementations
//!
//! Both stores implement `AccountRepository` with an atomic check-and-insert.

mod error;
mod memory;
mod postgres;

pub use memory::InMemoryAccountRepository;
pub use postgres::PgAccountRepository;
