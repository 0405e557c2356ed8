//! HTTP server setup and routing
//!
//! Sets up the Axum router with the effect catalog and processing
//! endpoints. CORS is restricted to the Vite dev-server origins the
//! frontend is served from.

use crate::audio::pipeline::AudioPipeline;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Maximum accepted upload size. Axum's default 2 MB body limit is smaller
/// than a few seconds of 44.1 kHz WAV; clips up to several minutes fit here.
const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Shared application context passed to all handlers
///
/// The pipeline is stateless and read-shared; cloning the context per
/// request only bumps the Arc.
#[derive(Clone)]
pub struct AppContext {
    pub pipeline: Arc<AudioPipeline>,
}

/// Create the API router
pub fn create_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:5173"),
            HeaderValue::from_static("http://127.0.0.1:5173"),
        ])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(super::handlers::home))
        .route("/health", get(super::handlers::health))
        .route("/api/effects", get(super::handlers::list_effects))
        .route("/api/process-audio", post(super::handlers::process_audio))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
