//! Review mutation handlers. Both require a logged-in session; the review
//! author is always the session user.

use std::collections::BTreeMap;

use actix_web::{delete, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::Reviews;
use crate::domain::ports::UpsertReviewRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Query string for `PUT /api/v1/auth/review/{isbn}`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct ReviewQuery {
    /// Review body.
    pub review: String,
}

/// Outcome of a review mutation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReviewMutationResponse {
    #[schema(example = "Review added/updated successfully")]
    pub message: String,
    /// The book's reviews after the change, keyed by username.
    pub reviews: BTreeMap<String, String>,
}

impl ReviewMutationResponse {
    fn new(message: &str, reviews: Reviews) -> Self {
        Self {
            message: message.to_owned(),
            reviews: reviews.as_map().clone(),
        }
    }
}

/// Add or replace the caller's review.
#[utoipa::path(
    put,
    path = "/api/v1/auth/review/{isbn}",
    params(("isbn" = String, Path, description = "Catalogue key"), ReviewQuery),
    responses(
        (status = 200, description = "Review saved", body = ReviewMutationResponse),
        (status = 400, description = "Review text missing", body = ErrorSchema),
        (status = 401, description = "Not logged in", body = ErrorSchema),
        (status = 404, description = "Book not found", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "upsertReview"
)]
#[put("/auth/review/{isbn}")]
pub async fn upsert_review(
    state: web::Data<HttpState>,
    session: SessionContext,
    isbn: web::Path<String>,
    query: web::Query<ReviewQuery>,
) -> ApiResult<web::Json<ReviewMutationResponse>> {
    let request = UpsertReviewRequest {
        isbn: isbn.into_inner(),
        text: query.into_inner().review,
    };
    let reviews = state.reviews.upsert_review(&session.state(), request).await?;
    Ok(web::Json(ReviewMutationResponse::new(
        "Review added/updated successfully",
        reviews,
    )))
}

/// Delete the caller's review.
#[utoipa::path(
    delete,
    path = "/api/v1/auth/review/{isbn}",
    params(("isbn" = String, Path, description = "Catalogue key")),
    responses(
        (status = 200, description = "Review deleted", body = ReviewMutationResponse),
        (status = 401, description = "Not logged in", body = ErrorSchema),
        (status = 404, description = "Book or review not found", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "deleteReview"
)]
#[delete("/auth/review/{isbn}")]
pub async fn delete_review(
    state: web::Data<HttpState>,
    session: SessionContext,
    isbn: web::Path<String>,
) -> ApiResult<web::Json<ReviewMutationResponse>> {
    let reviews = state.reviews.delete_review(&session.state(), &isbn).await?;
    Ok(web::Json(ReviewMutationResponse::new(
        "Review deleted successfully",
        reviews,
    )))
}
