//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`UserRegistry`, `Authenticator`, `CatalogueQuery`,
//! `ReviewCommand`) are called by inbound adapters. Driven ports
//! (`UserRepository`, `BookRepository`, `TokenIssuer`) are implemented by
//! outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod book_repository;
mod catalogue_query;
mod login_service;
mod review_command;
mod token_issuer;
mod user_registry;
mod user_repository;

#[cfg(test)]
pub use book_repository::MockBookRepository;
pub use book_repository::{BookRepository, BookRepositoryError};
#[cfg(test)]
pub use catalogue_query::MockCatalogueQuery;
pub use catalogue_query::CatalogueQuery;
#[cfg(test)]
pub use login_service::MockAuthenticator;
pub use login_service::Authenticator;
#[cfg(test)]
pub use review_command::MockReviewCommand;
pub use review_command::{ReviewCommand, UpsertReviewRequest};
#[cfg(test)]
pub use token_issuer::MockTokenIssuer;
pub use token_issuer::{TokenError, TokenIssuer};
#[cfg(test)]
pub use user_registry::MockUserRegistry;
pub use user_registry::UserRegistry;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{InsertOutcome, UserRepository, UserRepositoryError};
