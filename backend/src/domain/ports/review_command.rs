//! Driving port for review mutations.
//!
//! The author of a review is always the user bound to the session; callers
//! cannot name another user.

use async_trait::async_trait;

use crate::domain::{Error, Reviews, SessionState};

/// Request to add or replace the caller's review on a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertReviewRequest {
    /// Book key.
    pub isbn: String,
    /// Review body; empty when the client supplied none.
    pub text: String,
}

/// Review use-cases.
///
/// Checks run in a fixed order: session, then book, then payload.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewCommand: Send + Sync {
    /// Add or replace the caller's review and return the book's reviews.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` without an authenticated session.
    /// - `NotFound` when the book does not exist.
    /// - `InvalidRequest` when the review text is empty.
    async fn upsert_review(
        &self,
        session: &SessionState,
        request: UpsertReviewRequest,
    ) -> Result<Reviews, Error>;

    /// Delete the caller's review and return the remaining reviews.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` without an authenticated session.
    /// - `NotFound` when the book or the caller's review does not exist.
    async fn delete_review(&self, session: &SessionState, isbn: &str) -> Result<Reviews, Error>;
}
