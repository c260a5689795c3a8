//! Backend entry-point: loads settings, wires the fund stores, and serves the
//! REST endpoints.

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use civic_backend::inbound::http::health::HealthState;
use civic_backend::server::{ServerSettings, create_server};

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

    let settings = ServerSettings::load_from_iter(std::env::args_os()).map_err(|e| {
        error!(error = %e, "failed to load configuration");
        std::io::Error::other(format!("failed to load configuration: {e}"))
    })?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, &settings)
        .await
        .inspect_err(|e| error!(error = %e, "server startup failed"))?;
    server.await
}
