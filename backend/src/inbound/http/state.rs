//! Shared HTTP adapter state.
//!
//! Handlers receive this bundle through `actix_web::web::Data`, so they
//! depend only on driving ports and stay testable without real adapters.

use std::sync::Arc;

use crate::domain::ports::{Authenticator, CatalogueQuery, ReviewCommand, UserRegistry};

/// Port handles used by the HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registry: Arc<dyn UserRegistry>,
    pub auth: Arc<dyn Authenticator>,
    pub catalogue: Arc<dyn CatalogueQuery>,
    pub reviews: Arc<dyn ReviewCommand>,
}

impl HttpState {
    /// Bundle the driving ports.
    pub fn new(
        registry: Arc<dyn UserRegistry>,
        auth: Arc<dyn Authenticator>,
        catalogue: Arc<dyn CatalogueQuery>,
        reviews: Arc<dyn ReviewCommand>,
    ) -> Self {
        Self {
            registry,
            auth,
            catalogue,
            reviews,
        }
    }
}
