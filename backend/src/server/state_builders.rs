//! Wiring of domain services over the in-memory adapters.

use std::sync::Arc;

use crate::domain::ports::{Authenticator, TokenIssuer};
use crate::domain::{
    Catalogue, CatalogueService, ReviewService, SessionAuthenticator, TokenVerification,
    UserRegistryService,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{InMemoryBookRepository, InMemoryUserRepository};

/// Build the HTTP state over an empty user registry and the given catalogue.
///
/// The registry and authenticator share one user store; the catalogue query
/// and review command share one book store.
pub fn build_http_state<T>(
    catalogue: Catalogue,
    tokens: Arc<T>,
    verification: TokenVerification,
) -> HttpState
where
    T: TokenIssuer + 'static,
{
    let users = Arc::new(InMemoryUserRepository::default());
    let books = Arc::new(InMemoryBookRepository::new(catalogue));

    let auth: Arc<dyn Authenticator> =
        Arc::new(SessionAuthenticator::new(users.clone(), tokens).with_verification(verification));

    HttpState::new(
        Arc::new(UserRegistryService::new(users)),
        auth.clone(),
        Arc::new(CatalogueService::new(books.clone())),
        Arc::new(ReviewService::new(books, auth)),
    )
}
