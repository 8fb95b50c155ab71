//! Driven port for the append-only user registry store.

use async_trait::async_trait;

use crate::domain::{User, Username};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// The backing store could not be accessed.
        Unavailable { message: String } => "user repository unavailable: {message}",
    }
}

/// Result of an insert that must not overwrite an existing user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The user was appended.
    Inserted,
    /// A user with the same username already exists; nothing changed.
    AlreadyExists,
}

/// Storage for registered users.
///
/// Implementations must perform the uniqueness check and the append of
/// [`UserRepository::insert_if_absent`] as one atomic step.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Append `user` unless its username is already registered.
    async fn insert_if_absent(&self, user: User) -> Result<InsertOutcome, UserRepositoryError>;

    /// Look up a user by username.
    async fn find(&self, username: &Username) -> Result<Option<User>, UserRepositoryError>;

    /// Number of registered users.
    async fn count(&self) -> Result<usize, UserRepositoryError>;
}
