use shayari_backend::{app, AppState};
use shayari_common::{logging, Context, ShayariError};
use shayari_config::load_config;
use shayari_notify::Scheduler;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), ShayariError> {
    let config = Arc::new(load_config().context("Failed to load config")?);
    let _log_guard = logging::init(&config.logging);

    let state = AppState::new(config.clone()).await?;

    if config.notifications.enabled {
        Scheduler::from_config(state.dispatcher.clone(), &config.notifications)?.spawn();
    } else {
        info!("Shayari scheduler disabled");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app(&state))
        .await
        .context("Server error")?;

    Ok(())
}
