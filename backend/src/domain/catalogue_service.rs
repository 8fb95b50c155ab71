//! Catalogue read service implementing [`CatalogueQuery`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{BookRepository, BookRepositoryError, CatalogueQuery};
use crate::domain::{Book, BookSearch, Catalogue, Error, Isbn, Reviews};

/// Serves catalogue lookups from a [`BookRepository`].
#[derive(Clone)]
pub struct CatalogueService<B> {
    books: Arc<B>,
}

impl<B> CatalogueService<B> {
    /// Create a service reading from `books`.
    pub fn new(books: Arc<B>) -> Self {
        Self { books }
    }
}

pub(crate) fn book_not_found() -> Error {
    Error::not_found("Book not found")
}

pub(crate) fn map_book_repository_error(error: BookRepositoryError) -> Error {
    match error {
        BookRepositoryError::Unavailable { message } => {
            Error::internal(format!("book repository unavailable: {message}"))
        }
        BookRepositoryError::BookNotFound { .. } => book_not_found(),
        BookRepositoryError::ReviewNotFound { .. } => {
            Error::not_found("Review by this user not found")
        }
    }
}

fn into_catalogue(books: Vec<Book>) -> Catalogue {
    books
        .into_iter()
        .map(|book| (book.isbn.clone(), book))
        .collect()
}

impl<B> CatalogueService<B>
where
    B: BookRepository,
{
    async fn lookup(&self, isbn: &str) -> Result<Book, Error> {
        let Ok(isbn) = Isbn::new(isbn) else {
            return Err(book_not_found());
        };
        self.books
            .find_by_isbn(&isbn)
            .await
            .map_err(map_book_repository_error)?
            .ok_or_else(book_not_found)
    }

    async fn search(&self, search: BookSearch, missing: &str) -> Result<Catalogue, Error> {
        let found = self
            .books
            .search(&search)
            .await
            .map_err(map_book_repository_error)?;
        if found.is_empty() {
            return Err(Error::not_found(missing));
        }
        Ok(into_catalogue(found))
    }
}

#[async_trait]
impl<B> CatalogueQuery for CatalogueService<B>
where
    B: BookRepository,
{
    async fn list_all(&self) -> Result<Catalogue, Error> {
        let books = self.books.all().await.map_err(map_book_repository_error)?;
        Ok(into_catalogue(books))
    }

    async fn find_by_isbn(&self, isbn: &str) -> Result<Book, Error> {
        self.lookup(isbn).await
    }

    async fn find_by_author(&self, author: &str) -> Result<Catalogue, Error> {
        self.search(BookSearch::Author(author.to_owned()), "Author not found")
            .await
    }

    async fn find_by_title(&self, title: &str) -> Result<Catalogue, Error> {
        self.search(BookSearch::Title(title.to_owned()), "Title not found")
            .await
    }

    async fn reviews(&self, isbn: &str) -> Result<Reviews, Error> {
        Ok(self.lookup(isbn).await?.reviews)
    }
}
