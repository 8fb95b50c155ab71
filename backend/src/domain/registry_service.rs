//! User registry service implementing [`UserRegistry`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{InsertOutcome, UserRegistry, UserRepository, UserRepositoryError};
use crate::domain::{Credentials, Error, Username};

/// Registers accounts in a [`UserRepository`].
///
/// Passwords are stored as provided; no hashing is applied.
#[derive(Clone)]
pub struct UserRegistryService<R> {
    users: Arc<R>,
}

impl<R> UserRegistryService<R> {
    /// Create a registry backed by `users`.
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

pub(crate) fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Unavailable { message } => {
            Error::internal(format!("user repository unavailable: {message}"))
        }
    }
}

#[async_trait]
impl<R> UserRegistry for UserRegistryService<R>
where
    R: UserRepository,
{
    async fn register(&self, credentials: Credentials) -> Result<(), Error> {
        let username = credentials.username().clone();
        let outcome = self
            .users
            .insert_if_absent(credentials.into_user())
            .await
            .map_err(map_user_repository_error)?;
        match outcome {
            InsertOutcome::Inserted => {
                info!(username = %username, "user registered");
                Ok(())
            }
            InsertOutcome::AlreadyExists => {
                debug!(username = %username, "registration rejected: username taken");
                Err(Error::conflict("User already exists"))
            }
        }
    }

    async fn is_username_taken(&self, username: &str) -> Result<bool, Error> {
        let Ok(username) = Username::new(username) else {
            return Ok(false);
        };
        let found = self
            .users
            .find(&username)
            .await
            .map_err(map_user_repository_error)?;
        Ok(found.is_some())
    }
}
