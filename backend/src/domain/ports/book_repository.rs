//! Driven port for the catalogue store.
//!
//! Reads return owned snapshots. The two review mutations are the only writes
//! and each one runs as a single read-modify-write on the book's review map.

use async_trait::async_trait;

use crate::domain::{Book, BookSearch, Isbn, ReviewText, Reviews, Username};

use super::define_port_error;

define_port_error! {
    /// Errors raised by catalogue repository adapters.
    pub enum BookRepositoryError {
        /// The backing store could not be accessed.
        Unavailable { message: String } => "book repository unavailable: {message}",
        /// No book is stored under the ISBN.
        BookNotFound { isbn: String } => "book not found: {isbn}",
        /// The book has no review written by the user.
        ReviewNotFound { isbn: String, username: String } =>
            "no review by {username} on book {isbn}",
    }
}

/// Catalogue storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Every book, ordered by ISBN.
    async fn all(&self) -> Result<Vec<Book>, BookRepositoryError>;

    /// The book stored under `isbn`.
    async fn find_by_isbn(&self, isbn: &Isbn) -> Result<Option<Book>, BookRepositoryError>;

    /// Books matching `search`, ordered by ISBN.
    async fn search(&self, search: &BookSearch) -> Result<Vec<Book>, BookRepositoryError>;

    /// Set the review written by `username` and return the book's reviews.
    async fn upsert_review(
        &self,
        isbn: &Isbn,
        username: &Username,
        text: ReviewText,
    ) -> Result<Reviews, BookRepositoryError>;

    /// Remove the review written by `username` and return the remaining reviews.
    async fn delete_review(
        &self,
        isbn: &Isbn,
        username: &Username,
    ) -> Result<Reviews, BookRepositoryError>;
}
