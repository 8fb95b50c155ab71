//! HTTP inbound adapter exposing the bookstore REST endpoints.
//!
//! ```text
//! POST   /api/v1/register
//! POST   /api/v1/login
//! GET    /api/v1/books
//! GET    /api/v1/books/isbn/{isbn}
//! GET    /api/v1/books/author/{author}
//! GET    /api/v1/books/title/{title}
//! GET    /api/v1/books/{isbn}/reviews
//! PUT    /api/v1/auth/review/{isbn}?review=...
//! DELETE /api/v1/auth/review/{isbn}
//! ```

use actix_web::web;

pub mod books;
pub mod error;
pub mod health;
pub mod reviews;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;

/// Register every `/api/v1` handler on `cfg`.
///
/// The caller owns the scope prefix and the session middleware.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use bookstore::inbound::http::configure;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .app_data(error::query_config())
        .service(users::register)
        .service(users::login)
        .service(books::list_books)
        .service(books::book_by_isbn)
        .service(books::books_by_author)
        .service(books::books_by_title)
        .service(books::book_reviews)
        .service(reviews::upsert_review)
        .service(reviews::delete_review);
}
