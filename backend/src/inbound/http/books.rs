//! Read-only catalogue handlers.
//!
//! Lookups are exact and case-sensitive. Path segments are percent-decoded,
//! so `GET /api/v1/books/author/Jane%20Austen` matches `"Jane Austen"`.

use std::collections::BTreeMap;

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Book, Catalogue, Reviews};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Book record as returned to clients. The ISBN is the enclosing map key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookResponse {
    #[schema(example = "Chinua Achebe")]
    pub author: String,
    #[schema(example = "Things Fall Apart")]
    pub title: String,
    /// Review text keyed by username.
    pub reviews: BTreeMap<String, String>,
}

impl From<Book> for BookResponse {
    fn from(value: Book) -> Self {
        Self {
            author: value.author,
            title: value.title,
            reviews: value.reviews.as_map().clone(),
        }
    }
}

/// Books keyed by ISBN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct CatalogueResponse(pub BTreeMap<String, BookResponse>);

impl From<Catalogue> for CatalogueResponse {
    fn from(value: Catalogue) -> Self {
        Self(
            value
                .into_iter()
                .map(|(isbn, book)| (isbn.into(), BookResponse::from(book)))
                .collect(),
        )
    }
}

/// Review text keyed by username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ReviewsResponse(pub BTreeMap<String, String>);

impl From<Reviews> for ReviewsResponse {
    fn from(value: Reviews) -> Self {
        Self(value.as_map().clone())
    }
}

/// List the whole catalogue.
#[utoipa::path(
    get,
    path = "/api/v1/books",
    responses(
        (status = 200, description = "Catalogue keyed by ISBN", body = CatalogueResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "listBooks",
    security([])
)]
#[get("/books")]
pub async fn list_books(state: web::Data<HttpState>) -> ApiResult<web::Json<CatalogueResponse>> {
    let catalogue = state.catalogue.list_all().await?;
    Ok(web::Json(catalogue.into()))
}

/// Fetch one book by ISBN.
#[utoipa::path(
    get,
    path = "/api/v1/books/isbn/{isbn}",
    params(("isbn" = String, Path, description = "Catalogue key")),
    responses(
        (status = 200, description = "Book", body = BookResponse),
        (status = 404, description = "Book not found", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "getBookByIsbn",
    security([])
)]
#[get("/books/isbn/{isbn}")]
pub async fn book_by_isbn(
    state: web::Data<HttpState>,
    isbn: web::Path<String>,
) -> ApiResult<web::Json<BookResponse>> {
    let book = state.catalogue.find_by_isbn(&isbn).await?;
    Ok(web::Json(book.into()))
}

/// Books whose author matches exactly.
#[utoipa::path(
    get,
    path = "/api/v1/books/author/{author}",
    params(("author" = String, Path, description = "Exact author name")),
    responses(
        (status = 200, description = "Matching books keyed by ISBN", body = CatalogueResponse),
        (status = 404, description = "Author not found", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "getBooksByAuthor",
    security([])
)]
#[get("/books/author/{author}")]
pub async fn books_by_author(
    state: web::Data<HttpState>,
    author: web::Path<String>,
) -> ApiResult<web::Json<CatalogueResponse>> {
    let books = state.catalogue.find_by_author(&author).await?;
    Ok(web::Json(books.into()))
}

/// Books whose title matches exactly.
#[utoipa::path(
    get,
    path = "/api/v1/books/title/{title}",
    params(("title" = String, Path, description = "Exact title")),
    responses(
        (status = 200, description = "Matching books keyed by ISBN", body = CatalogueResponse),
        (status = 404, description = "Title not found", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "getBooksByTitle",
    security([])
)]
#[get("/books/title/{title}")]
pub async fn books_by_title(
    state: web::Data<HttpState>,
    title: web::Path<String>,
) -> ApiResult<web::Json<CatalogueResponse>> {
    let books = state.catalogue.find_by_title(&title).await?;
    Ok(web::Json(books.into()))
}

/// Reviews on one book.
#[utoipa::path(
    get,
    path = "/api/v1/books/{isbn}/reviews",
    params(("isbn" = String, Path, description = "Catalogue key")),
    responses(
        (status = 200, description = "Reviews keyed by username", body = ReviewsResponse),
        (status = 404, description = "Book not found", body = ErrorSchema)
    ),
    tags = ["books"],
    operation_id = "getBookReviews",
    security([])
)]
#[get("/books/{isbn}/reviews")]
pub async fn book_reviews(
    state: web::Data<HttpState>,
    isbn: web::Path<String>,
) -> ApiResult<web::Json<ReviewsResponse>> {
    let reviews = state.catalogue.reviews(&isbn).await?;
    Ok(web::Json(reviews.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockCatalogueQuery;
    use crate::inbound::http::test_utils::{in_memory_state, test_app, unused_state};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::sync::Arc;

    async fn get_json(state: HttpState, uri: &str) -> (StatusCode, Value) {
        let app = actix_test::init_service(test_app(state)).await;
        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;
        let status = response.status();
        let body: Value = actix_test::read_body_json(response).await;
        (status, body)
    }

    #[actix_web::test]
    async fn list_returns_seeded_catalogue_keyed_by_isbn() {
        let (status, body) = get_json(in_memory_state(), "/api/v1/books").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_object().map(|books| books.len()), Some(10));
        assert_eq!(
            body["1"],
            json!({ "author": "Chinua Achebe", "title": "Things Fall Apart", "reviews": {} })
        );
    }

    #[rstest]
    #[case("/api/v1/books/isbn/does-not-exist", "Book not found")]
    #[case("/api/v1/books/isbn/%201", "Book not found")]
    #[case("/api/v1/books/1%20/reviews", "Book not found")]
    #[case("/api/v1/books/does-not-exist/reviews", "Book not found")]
    #[case("/api/v1/books/author/jane%20austen", "Author not found")]
    #[case("/api/v1/books/title/Nothing", "Title not found")]
    #[actix_web::test]
    async fn missing_lookups_are_not_found(#[case] uri: &str, #[case] message: &str) {
        let (status, body) = get_json(in_memory_state(), uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
        assert_eq!(body["message"], message);
    }

    #[actix_web::test]
    async fn author_path_is_percent_decoded() {
        let (status, body) = get_json(in_memory_state(), "/api/v1/books/author/Unknown").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_object().map(|books| books.len()), Some(4));

        let (status, body) =
            get_json(in_memory_state(), "/api/v1/books/author/Jane%20Austen").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["8"]["title"], "Pride and Prejudice");
    }

    #[actix_web::test]
    async fn internal_failures_are_redacted() {
        let mut catalogue = MockCatalogueQuery::new();
        catalogue
            .expect_list_all()
            .returning(|| Err(crate::domain::Error::internal("catalogue lock poisoned")));
        let mut state = unused_state();
        state.catalogue = Arc::new(catalogue);

        let (status, body) = get_json(state, "/api/v1/books").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal server error");
    }
}
