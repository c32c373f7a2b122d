//! HTTP query surface.
//!
//! JSON endpoints under `/api`, a health check, and the debug images as
//! static files.

mod error;
mod handlers;

pub use error::ApiError;
pub use handlers::HealthResponse;

use crate::config::{Config, parse_bind_addr};
use crate::constants::debug_image;
use crate::detection::FsDetectionSource;
use crate::error::{Error, Result};
use crate::query::SiteQuery;
use axum::Router;
use axum::routing::get;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    query: Arc<SiteQuery<FsDetectionSource>>,
    debug_images_dir: PathBuf,
}

impl AppState {
    /// Create state around a query service.
    pub fn new(query: SiteQuery<FsDetectionSource>, debug_images_dir: impl Into<PathBuf>) -> Self {
        Self {
            query: Arc::new(query),
            debug_images_dir: debug_images_dir.into(),
        }
    }

    /// State for the directories named in `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            crate::query::site_query(config),
            config.data.debug_images_dir.clone(),
        )
    }

    /// Directory debug images are served from.
    pub fn debug_images_dir(&self) -> &Path {
        &self.debug_images_dir
    }
}

/// Build the application router.
///
/// The debug image route is only mounted when its directory exists at
/// startup.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/sites", get(handlers::list_sites))
        .route("/api/sites/:id", get(handlers::get_site))
        .route("/api/detections", get(handlers::list_detections))
        .route("/api/detections/:image_id", get(handlers::get_detection))
        .route("/api/stats", get(handlers::stats))
        .route("/health", get(handlers::health));

    let debug_dir = state.debug_images_dir();
    let router = if debug_dir.is_dir() {
        info!(
            "Serving debug images from {} at {}",
            debug_dir.display(),
            debug_image::URL_PREFIX
        );
        api.nest_service(debug_image::URL_PREFIX, ServeDir::new(debug_dir))
    } else {
        warn!(
            "Debug image directory not found, {} is disabled: {}",
            debug_image::URL_PREFIX,
            debug_dir.display()
        );
        api
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Run the server until Ctrl+C.
pub async fn serve(config: &Config) -> Result<()> {
    let addr = parse_bind_addr(&config.server.bind)?;

    if !config.data.detections_dir.is_dir() {
        warn!(
            "Detection directory does not exist yet: {} (requests will fail until it is created)",
            config.data.detections_dir.display()
        );
    }

    let app = build_router(AppState::from_config(config));

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| Error::ServerBind {
            addr: config.server.bind.clone(),
            source,
        })?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {e}");
        // Without a signal handler, keep serving until the process is killed.
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
