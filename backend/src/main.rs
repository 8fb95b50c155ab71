//! Bookstore entry-point: loads settings, seeds the catalogue, and serves the
//! REST API.

use std::sync::Arc;

use actix_web::web;
use mockable::{DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use bookstore::inbound::http::health::HealthState;
use bookstore::inbound::http::session_config::session_settings_from_env;
use bookstore::outbound::seed::load_catalogue;
use bookstore::outbound::token::HmacTokenIssuer;
use bookstore::server::{ServerConfig, build_http_state, create_server};
use bookstore::settings::{AppSettings, BuildMode};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let mode = BuildMode::from_debug_assertions();
    let settings = AppSettings::load().map_err(|e| std::io::Error::other(e.to_string()))?;
    let session = session_settings_from_env(&DefaultEnv::new(), mode)
        .map_err(std::io::Error::other)?;
    let secret = settings.token_secret(mode).map_err(std::io::Error::other)?;
    let catalogue =
        load_catalogue(settings.catalogue_path.as_deref()).map_err(std::io::Error::other)?;

    let tokens = HmacTokenIssuer::new(
        secret.as_slice(),
        settings.token_ttl(),
        Arc::new(DefaultClock),
    );
    let http_state = build_http_state(
        catalogue,
        Arc::new(tokens),
        settings.token_verification(),
    );

    let config = ServerConfig::from_session(session, settings.bind_addr());
    info!(
        addr = %config.bind_addr(),
        verification = ?settings.token_verification(),
        "starting bookstore server"
    );
    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, http_state, config)?.await
}
