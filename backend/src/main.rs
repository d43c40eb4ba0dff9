//! Backend entry-point: selects the backing store, wires REST endpoints and
//! OpenAPI docs, and releases the store on shutdown.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use hunter_backend::inbound::http::health::HealthState;
use hunter_backend::outbound::store::{providers_from_settings, select_store};
use hunter_backend::settings::HunterSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        HunterSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    let selection = select_store(providers_from_settings(&settings))
        .await
        .wrap_err("no backing store could be started")?;
    let status = selection.status(
        settings.database_url().is_some(),
        settings.database_name().is_some(),
    );
    let guard = selection.guard;

    let bind_addr = settings.bind_addr();
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        ServerConfig::new(bind_addr, selection.ports, status),
    )
    .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, "listening");

    let outcome = server.await;
    health_state.mark_unhealthy();
    guard.release().await;
    outcome.wrap_err("server terminated abnormally")
}
