//! Domain primitives, ports, and services.
//!
//! Purpose: hold the review-ownership and session-authorisation rules of the
//! bookstore independent of transport and storage. Value types validate on
//! construction; services implement the driving ports in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: use-case error and stable code.
//! - Credentials, Username, Password, User: registry types.
//! - SessionState, AuthenticatedSession, SessionToken: session context.
//! - Book, Isbn, Reviews, ReviewText, Catalogue: catalogue types.
//! - UserRegistryService, SessionAuthenticator, CatalogueService,
//!   ReviewService: port implementations.

pub mod auth;
mod auth_service;
pub mod book;
mod catalogue_service;
pub mod error;
pub mod ports;
mod registry_service;
mod review_service;
pub mod session;
pub mod trace_id;
pub mod user;

pub use self::auth::Credentials;
pub use self::auth_service::SessionAuthenticator;
pub use self::book::{
    Book, BookSearch, BookValidationError, Catalogue, Isbn, ReviewText, Reviews,
};
pub use self::catalogue_service::CatalogueService;
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::registry_service::UserRegistryService;
pub use self::review_service::ReviewService;
pub use self::session::{
    AuthenticatedSession, SessionState, SessionToken, TokenClaims, TokenVerification,
};
pub use self::trace_id::TraceId;
pub use self::user::{Password, User, UserValidationError, Username};
