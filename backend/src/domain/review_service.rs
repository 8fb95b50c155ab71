//! Review mutations implementing [`ReviewCommand`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::catalogue_service::{book_not_found, map_book_repository_error};
use crate::domain::ports::{Authenticator, BookRepository, ReviewCommand, UpsertReviewRequest};
use crate::domain::{Error, Isbn, ReviewText, Reviews, SessionState};

/// Applies review changes to a [`BookRepository`] on behalf of the session
/// user, after the [`Authenticator`] gate admits the session.
#[derive(Clone)]
pub struct ReviewService<B> {
    books: Arc<B>,
    auth: Arc<dyn Authenticator>,
}

impl<B> ReviewService<B> {
    /// Create a service writing to `books`, gated by `auth`.
    pub fn new(books: Arc<B>, auth: Arc<dyn Authenticator>) -> Self {
        Self { books, auth }
    }
}

#[async_trait]
impl<B> ReviewCommand for ReviewService<B>
where
    B: BookRepository,
{
    async fn upsert_review(
        &self,
        session: &SessionState,
        request: UpsertReviewRequest,
    ) -> Result<Reviews, Error> {
        let username = self.auth.require_authenticated(session)?;
        let isbn = Isbn::new(&request.isbn).map_err(|_| book_not_found())?;
        if self
            .books
            .find_by_isbn(&isbn)
            .await
            .map_err(map_book_repository_error)?
            .is_none()
        {
            return Err(book_not_found());
        }
        let text = ReviewText::new(request.text).map_err(|_| {
            Error::invalid_request("Review text is required as query parameter 'review'")
                .with_details(json!({ "field": "review", "code": "empty_review" }))
        })?;

        let reviews = self
            .books
            .upsert_review(&isbn, &username, text)
            .await
            .map_err(map_book_repository_error)?;
        info!(isbn = %isbn, username = %username, "review saved");
        Ok(reviews)
    }

    async fn delete_review(&self, session: &SessionState, isbn: &str) -> Result<Reviews, Error> {
        let username = self.auth.require_authenticated(session)?;
        let isbn = Isbn::new(isbn).map_err(|_| book_not_found())?;
        let reviews = self
            .books
            .delete_review(&isbn, &username)
            .await
            .map_err(map_book_repository_error)?;
        info!(isbn = %isbn, username = %username, "review deleted");
        Ok(reviews)
    }
}
