//! Append-only user store.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{InsertOutcome, UserRepository, UserRepositoryError};
use crate::domain::{User, Username};

/// Users kept in registration order.
///
/// Lookups scan linearly; the registry is expected to stay small.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    fn lock(&self) -> Result<MutexGuard<'_, Vec<User>>, UserRepositoryError> {
        self.users
            .lock()
            .map_err(|_| UserRepositoryError::unavailable("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert_if_absent(&self, user: User) -> Result<InsertOutcome, UserRepositoryError> {
        let mut users = self.lock()?;
        if users
            .iter()
            .any(|existing| existing.username() == user.username())
        {
            return Ok(InsertOutcome::AlreadyExists);
        }
        users.push(user);
        Ok(InsertOutcome::Inserted)
    }

    async fn find(&self, username: &Username) -> Result<Option<User>, UserRepositoryError> {
        let users = self.lock()?;
        Ok(users
            .iter()
            .find(|user| user.username() == username)
            .cloned())
    }

    async fn count(&self) -> Result<usize, UserRepositoryError> {
        Ok(self.lock()?.len())
    }
}
