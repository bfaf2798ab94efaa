//! Power Hub entry-point: wires HTML pages, the JSON API and OpenAPI docs.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use powerhub::inbound::http::health::HealthState;
use powerhub::inbound::http::session_config::{BuildMode, session_settings};
use server::{AppSettings, ServerConfig, build_http_state, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let mode = BuildMode::from_debug_assertions();
    let toggles = settings.session_toggles().map_err(std::io::Error::other)?;
    let session =
        session_settings(&toggles, mode).map_err(|e| std::io::Error::other(e.to_string()))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let http_state = build_http_state(&settings, mode).map_err(std::io::Error::other)?;

    let config = ServerConfig::new(session, bind_addr);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(server::build_metrics()?));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, http_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}
