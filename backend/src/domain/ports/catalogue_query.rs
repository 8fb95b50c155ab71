//! Driving port for read-only catalogue lookups.

use async_trait::async_trait;

use crate::domain::{Book, Catalogue, Error, Reviews};

/// Catalogue read use-cases.
///
/// Lookups are exact and case-sensitive. Author and title lookups that match
/// nothing fail with [`crate::domain::ErrorCode::NotFound`] rather than
/// returning an empty catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueQuery: Send + Sync {
    /// Snapshot of the whole catalogue.
    async fn list_all(&self) -> Result<Catalogue, Error>;

    /// The book stored under `isbn`.
    async fn find_by_isbn(&self, isbn: &str) -> Result<Book, Error>;

    /// Books written by `author`.
    async fn find_by_author(&self, author: &str) -> Result<Catalogue, Error>;

    /// Books titled `title`.
    async fn find_by_title(&self, title: &str) -> Result<Catalogue, Error>;

    /// Reviews on the book stored under `isbn`.
    async fn reviews(&self, isbn: &str) -> Result<Reviews, Error>;
}
