//! Outbound adapters implementing the driven domain ports.
//!
//! - **memory**: process-local user and catalogue stores
//! - **token**: HMAC-SHA256 session token issuer
//! - **seed**: catalogue seed parsing and loading
//!
//! Adapters are thin translators between domain types and their storage or
//! encoding. They contain no business rules.

pub mod memory;
pub mod seed;
pub mod token;
