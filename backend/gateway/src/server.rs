//! Main HTTP relay server and routing.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use plchat_agent::ChatService;

use crate::{chat_api, health_api, static_files};

/// JSON bodies above this size are rejected.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Application state shared across routes. Immutable after startup.
pub struct AppState {
    pub service: ChatService,
    pub public_dir: PathBuf,
    /// Hides debug fields and the access log.
    pub production: bool,
}

impl AppState {
    pub fn new(service: ChatService, public_dir: impl Into<PathBuf>, production: bool) -> Self {
        Self {
            service,
            public_dir: public_dir.into(),
            production,
        }
    }
}

/// Build the Axum router with all routes and layers.
pub fn build_router(state: Arc<AppState>) -> Router {
    let production = state.production;
    let app = Router::new()
        .route("/api/chat", post(chat_api::chat))
        .route("/api/health", get(health_api::health))
        .fallback_service(static_files::spa_service(&state.public_dir))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state);

    if production {
        app
    } else {
        app.layer(TraceLayer::new_for_http())
    }
}

/// Bind and serve until Ctrl-C.
#[instrument(skip(state))]
pub async fn start_server(addr: SocketAddr, state: Arc<AppState>) -> Result<()> {
    let app = build_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("PL chat server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
