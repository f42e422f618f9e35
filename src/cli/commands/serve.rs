use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

use crate::api;
use crate::state::SharedState;

pub async fn cmd_serve(state: Arc<SharedState>) -> anyhow::Result<()> {
    info!("mangadb v{} starting...", env!("CARGO_PKG_VERSION"));

    // Best effort; the handle reconnects on the next request.
    if let Err(e) = state.store.acquire().await {
        warn!("Database not ready yet: {}", e);
    }

    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let app = api::router(api::create_app_state(state));
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 Web Server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}
