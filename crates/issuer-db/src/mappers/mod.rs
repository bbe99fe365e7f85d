//! Model to entity mappers
//!
//! Rows are re-validated on the way out: a stored identity that no longer
//! parses, or an empty hash, surfaces as a `DomainError` rather than a
//! silently broken `Account`.

mod account;
