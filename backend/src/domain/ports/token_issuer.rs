//! Driven port for session token issuance.
//!
//! The signing key and expiry policy live behind this trait so the login
//! use-case never handles key material.

use crate::domain::{SessionToken, TokenClaims, Username};

use super::define_port_error;

define_port_error! {
    /// Errors raised while issuing or verifying tokens.
    pub enum TokenError {
        /// The token could not be produced.
        Issue { message: String } => "token issuance failed: {message}",
        /// The token is not in the expected encoding.
        Malformed { message: String } => "malformed token: {message}",
        /// The signature does not match the payload.
        BadSignature => "token signature mismatch",
        /// The token's validity window has passed.
        Expired { expired_at: String } => "token expired at {expired_at}",
    }
}

/// Issues and verifies signed session tokens.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Sign a token bound to `username`.
    fn issue(&self, username: &Username) -> Result<SessionToken, TokenError>;

    /// Check signature and expiry, returning the embedded claims.
    fn verify(&self, token: &SessionToken) -> Result<TokenClaims, TokenError>;
}
