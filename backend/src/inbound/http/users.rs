//! Registration and login handlers.
//!
//! ```text
//! POST /api/v1/register {"username":"alice","password":"pw1"}
//! POST /api/v1/login {"username":"alice","password":"pw1"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Credentials, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, MessageResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Username/password body shared by `register` and `login`.
///
/// Missing fields deserialise as empty strings and are rejected by
/// validation.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CredentialsRequest {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "pw1")]
    pub password: String,
}

impl TryFrom<CredentialsRequest> for Credentials {
    type Error = Error;

    fn try_from(value: CredentialsRequest) -> Result<Self, Self::Error> {
        Ok(Self::try_from_parts(&value.username, &value.password)?)
    }
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "User registered", body = MessageResponse),
        (status = 400, description = "Missing username or password", body = ErrorSchema),
        (status = 409, description = "Username already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let credentials = Credentials::try_from(payload.into_inner())?;
    state.registry.register(credentials).await?;
    Ok(web::Json(MessageResponse::new("User successfully registered")))
}

/// Authenticate and attach a session to the client cookie.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Login success", body = MessageResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Missing username or password", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = Credentials::try_from(payload.into_inner())?;
    let authenticated = state.auth.login(&credentials).await?;
    session.persist(&authenticated)?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("User successfully logged in")))
}
