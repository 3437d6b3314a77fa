//! Loremap server: pins API, editor sessions, and viewer static hosting.

mod config;
mod db;
mod routes;
mod services;
mod state;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, ConfigError};
use crate::services::session;
use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("database init failed: {0}")]
    Database(#[from] sqlx::Error),
    #[error("server io: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("ignoring malformed .env: {e}");
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    let pool = db::init_pool(&config.database_url, config.db_max_connections).await?;

    match session::purge_expired(&pool).await {
        Ok(purged) => info!(purged, "expired sessions removed"),
        Err(e) => warn!(error = %e, "expired session cleanup failed"),
    }

    let port = config.port;
    let static_dir = config.static_dir.clone();
    let state = AppState::new(pool, config);
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;

    info!(%port, static_dir = ?static_dir, "loremap listening");
    axum::serve(listener, app).await?;
    Ok(())
}
