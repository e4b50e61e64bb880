//! Router construction and server entry point.
//!
//! One request is handled independently of all others; the only shared
//! state is the read-only configuration, so concurrent streams never
//! block each other.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tidecast_core::TidecastConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::handlers::{list_category, list_videos, stream_file, stream_video};

/// Shared application state: read-only configuration only.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<TidecastConfig>,
}

impl AppState {
    pub fn new(config: TidecastConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

/// Builds the Tidecast router over the given configuration.
///
/// Cross-origin access is allowed from any origin: the server targets
/// local-network browsers on arbitrary hosts.
pub fn build_router(config: TidecastConfig) -> Router {
    Router::new()
        // Flat listing and streaming (legacy surface)
        .route("/videos", get(list_videos))
        .route("/video/{filename}", get(stream_video))
        // Category-scoped listing and streaming
        .route("/files/{category}", get(list_category))
        .route("/file/{category}/{filename}", get(stream_file))
        .layer(CorsLayer::permissive())
        .with_state(AppState::new(config))
}

/// Binds and serves until the process is stopped.
///
/// # Errors
/// - `std::io::Error` - Binding or serving failed
pub async fn run_server(config: TidecastConfig) -> Result<(), std::io::Error> {
    let bind_address = config.bind_address();
    let media_root = config.library.media_root.clone();
    let app = build_router(config);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!(
        "Tidecast serving {} on http://{}",
        media_root.display(),
        bind_address
    );
    axum::serve(listener, app).await
}
