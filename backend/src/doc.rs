//! OpenAPI documentation.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the DTO schemas, and the error
//! schema mirrors from [`crate::inbound::http::schemas`]. Swagger UI serves
//! it in debug builds and `cargo run --bin openapi-dump` prints it.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::books::{BookResponse, CatalogueResponse, ReviewsResponse};
use crate::inbound::http::reviews::ReviewMutationResponse;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, MessageResponse};
use crate::inbound::http::users::CredentialsRequest;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the bookstore API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Bookstore catalogue API",
        description = "Book lookups, account registration, and session-authenticated reviews."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::books::list_books,
        crate::inbound::http::books::book_by_isbn,
        crate::inbound::http::books::books_by_author,
        crate::inbound::http::books::books_by_title,
        crate::inbound::http::books::book_reviews,
        crate::inbound::http::reviews::upsert_review,
        crate::inbound::http::reviews::delete_review,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CredentialsRequest,
        MessageResponse,
        BookResponse,
        CatalogueResponse,
        ReviewsResponse,
        ReviewMutationResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "users", description = "Registration and login"),
        (name = "books", description = "Catalogue lookups"),
        (name = "reviews", description = "Review changes by the logged-in user"),
        (name = "health", description = "Probes for orchestrators")
    )
)]
pub struct ApiDoc;
