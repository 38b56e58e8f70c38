mod config;

use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use tasklist_api::auth::{AppState, AppStateInner};
use tasklist_api::router::router;

use crate::config::{Config, DEFAULT_LOG_FILTER};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();

    let config = Config::from_env()?;

    // Init database
    let db = tasklist_db::Database::open(&config.db_path, config.store_timeout)?;

    let state: AppState = Arc::new(AppStateInner {
        db,
        store_timeout: config.store_timeout,
    });

    let app = router(state, &config.static_dir).layer(TraceLayer::new_for_http());

    let addr = config.addr()?;
    info!("Tasklist server listening on {}", addr);
    info!("Serving static assets from {}", config.static_dir.display());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
