use std::net::SocketAddr;

use axum::{
    Router,
    routing::{get, post, put},
};
use tokio::net::TcpListener;
use tower_http::decompression::RequestDecompressionLayer;
use tracing::info;

use super::{
    services::{health, list_parsers, metrics, parse_body, set_priority},
    state::AppState,
};
use crate::config::Config;

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// All routes, wired to `state`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/parse", post(parse_body))
        .route("/parsers", get(list_parsers))
        .route("/parsers/priority", put(set_priority))
        .route("/operators/metrics", get(metrics))
        .route("/health", get(health))
        .with_state(state)
        // Automatically decompress gzip request bodies
        .layer(RequestDecompressionLayer::new())
}

pub async fn run(config: Config, address: SocketAddr) -> Result<(), AnyError> {
    let registry = config
        .build_registry()
        .map_err(|e| format!("Failed to build parser registry: {}", e))?;
    info!(parsers = registry.len(), "Parser registry ready");

    let app = router(AppState::new(config, registry));

    let listener = TcpListener::bind(address).await?;
    info!(%address, "parsebox listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        let mut sigterm = signal(SignalKind::terminate())
            .expect("failed to install signal handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
