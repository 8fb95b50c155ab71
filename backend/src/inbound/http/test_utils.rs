//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::TokenVerification;
use crate::domain::ports::{
    MockAuthenticator, MockCatalogueQuery, MockReviewCommand, MockUserRegistry,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::seed::default_catalogue;
use crate::outbound::token::{DEFAULT_TOKEN_TTL, HmacTokenIssuer};
use crate::server::build_http_state;

/// Session middleware with a fresh key, cookie name `session`, and the
/// `Secure` flag off for plain-HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// State wired to real services over the built-in catalogue.
pub fn in_memory_state() -> HttpState {
    let catalogue = default_catalogue().expect("built-in seed parses");
    let tokens = HmacTokenIssuer::new(
        b"test-secret".to_vec(),
        DEFAULT_TOKEN_TTL,
        Arc::new(mockable::DefaultClock),
    );
    build_http_state(catalogue, Arc::new(tokens), TokenVerification::TrustSession)
}

/// State whose ports panic on any call; tests replace the ports they use.
pub fn unused_state() -> HttpState {
    HttpState::new(
        Arc::new(MockUserRegistry::new()),
        Arc::new(MockAuthenticator::new()),
        Arc::new(MockCatalogueQuery::new()),
        Arc::new(MockReviewCommand::new()),
    )
}

/// `/api/v1` routes over `state` behind a test session middleware.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(web::Data::new(state)).service(
        web::scope("/api/v1")
            .wrap(test_session_middleware())
            .configure(super::configure),
    )
}
