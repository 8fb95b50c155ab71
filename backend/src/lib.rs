//! Bookstore catalogue service.
//!
//! - [`domain`]: value types, ports, and use-case services.
//! - [`inbound`]: HTTP adapter.
//! - [`outbound`]: in-memory stores, token issuer, and catalogue seed.
//! - [`server`]: application assembly.

pub mod cap_fs;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
