//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Credentials, Error};

/// Registration use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistry: Send + Sync {
    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ErrorCode::Conflict`] when the username is
    /// already registered.
    async fn register(&self, credentials: Credentials) -> Result<(), Error>;

    /// Whether `username` is already registered.
    ///
    /// Blank names are never taken.
    async fn is_username_taken(&self, username: &str) -> Result<bool, Error>;
}
