//! Catalogue store keyed by ISBN.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{BookRepository, BookRepositoryError};
use crate::domain::{Book, BookSearch, Catalogue, Isbn, ReviewText, Reviews, Username};

/// Books behind a single read/write lock.
///
/// The key set is fixed after construction; only review maps change. Each
/// review mutation holds the write lock for its whole read-modify-write, so
/// concurrent writers on one book never lose an update.
#[derive(Debug, Default)]
pub struct InMemoryBookRepository {
    books: RwLock<Catalogue>,
}

impl InMemoryBookRepository {
    /// Build a store from a seeded catalogue.
    pub fn new(catalogue: Catalogue) -> Self {
        Self {
            books: RwLock::new(catalogue),
        }
    }

    /// Build a store from a list of books. Later duplicates replace earlier ones.
    pub fn from_books(books: impl IntoIterator<Item = Book>) -> Self {
        Self::new(
            books
                .into_iter()
                .map(|book| (book.isbn.clone(), book))
                .collect(),
        )
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Catalogue>, BookRepositoryError> {
        self.books
            .read()
            .map_err(|_| BookRepositoryError::unavailable("catalogue lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Catalogue>, BookRepositoryError> {
        self.books
            .write()
            .map_err(|_| BookRepositoryError::unavailable("catalogue lock poisoned"))
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn all(&self) -> Result<Vec<Book>, BookRepositoryError> {
        Ok(self.read()?.values().cloned().collect())
    }

    async fn find_by_isbn(&self, isbn: &Isbn) -> Result<Option<Book>, BookRepositoryError> {
        Ok(self.read()?.get(isbn).cloned())
    }

    async fn search(&self, search: &BookSearch) -> Result<Vec<Book>, BookRepositoryError> {
        Ok(self
            .read()?
            .values()
            .filter(|book| search.matches(book))
            .cloned()
            .collect())
    }

    async fn upsert_review(
        &self,
        isbn: &Isbn,
        username: &Username,
        text: ReviewText,
    ) -> Result<Reviews, BookRepositoryError> {
        let mut books = self.write()?;
        let book = books
            .get_mut(isbn)
            .ok_or_else(|| BookRepositoryError::book_not_found(isbn.as_ref()))?;
        book.reviews.set(username, text);
        Ok(book.reviews.clone())
    }

    async fn delete_review(
        &self,
        isbn: &Isbn,
        username: &Username,
    ) -> Result<Reviews, BookRepositoryError> {
        let mut books = self.write()?;
        let book = books
            .get_mut(isbn)
            .ok_or_else(|| BookRepositoryError::book_not_found(isbn.as_ref()))?;
        if book.reviews.remove(username).is_none() {
            return Err(BookRepositoryError::review_not_found(
                isbn.as_ref(),
                username.as_ref(),
            ));
        }
        Ok(book.reviews.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::sync::Arc;

    fn book(isbn: &str, title: &str, author: &str) -> Book {
        Book {
            isbn: Isbn::new(isbn).expect("isbn"),
            title: title.to_owned(),
            author: author.to_owned(),
            reviews: Reviews::default(),
        }
    }

    fn name(raw: &str) -> Username {
        Username::new(raw).expect("username")
    }

    fn text(raw: &str) -> ReviewText {
        ReviewText::new(raw).expect("review text")
    }

    #[fixture]
    fn repo() -> InMemoryBookRepository {
        InMemoryBookRepository::from_books([
            book("2", "Fairy tales", "Hans Christian Andersen"),
            book("1", "Things Fall Apart", "Chinua Achebe"),
            book("4", "The Epic Of Gilgamesh", "Unknown"),
            book("5", "The Book Of Job", "Unknown"),
        ])
    }

    #[rstest]
    #[tokio::test]
    async fn all_is_ordered_by_isbn(repo: InMemoryBookRepository) {
        let isbns: Vec<String> = repo
            .all()
            .await
            .expect("all books")
            .into_iter()
            .map(|book| book.isbn.into())
            .collect();
        assert_eq!(isbns, ["1", "2", "4", "5"]);
    }

    #[rstest]
    #[tokio::test]
    async fn search_returns_every_match(repo: InMemoryBookRepository) {
        let found = repo
            .search(&BookSearch::Author("Unknown".to_owned()))
            .await
            .expect("search");
        assert_eq!(found.len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn upsert_on_missing_book_fails(repo: InMemoryBookRepository) {
        let err = repo
            .upsert_review(&Isbn::new("99").expect("isbn"), &name("alice"), text("x"))
            .await
            .expect_err("missing book");
        assert_eq!(err, BookRepositoryError::book_not_found("99"));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_missing_review_reports_user(repo: InMemoryBookRepository) {
        let err = repo
            .delete_review(&Isbn::new("1").expect("isbn"), &name("alice"))
            .await
            .expect_err("no review");
        assert_eq!(err, BookRepositoryError::review_not_found("1", "alice"));
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_reviewers_are_all_kept(repo: InMemoryBookRepository) {
        let repo = Arc::new(repo);
        let isbn = Isbn::new("1").expect("isbn");
        let handles: Vec<_> = (0..12)
            .map(|n| {
                let repo = Arc::clone(&repo);
                let isbn = isbn.clone();
                tokio::spawn(async move {
                    repo.upsert_review(&isbn, &name(&format!("user{n}")), text("ok"))
                        .await
                        .expect("upsert")
                })
            })
            .collect();
        for handle in handles {
            handle.await.expect("task joins");
        }

        let book = repo
            .find_by_isbn(&isbn)
            .await
            .expect("lookup")
            .expect("book exists");
        assert_eq!(book.reviews.len(), 12);
    }
}
