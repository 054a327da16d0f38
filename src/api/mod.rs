use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    routing::{get, post},
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::query_engine::QueryEngine;

pub mod handlers;
pub mod models;

/// Shared, read-only state of the HTTP server.
pub struct AppState {
    pub engine: QueryEngine,
    pub uploads_dir: PathBuf,
}

pub fn create_router(state: Arc<AppState>, static_dir: &Path, max_upload_bytes: usize) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let uploads = Router::new()
        .route("/upload_pdf", post(handlers::upload_pdf_handler))
        .route("/upload_image", post(handlers::upload_image_handler))
        .layer(DefaultBodyLimit::max(max_upload_bytes));

    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/search", post(handlers::search_handler))
        .route("/people", post(handlers::people_handler))
        .merge(uploads)
        .with_state(state)
        // Static files for the UI, index.html at "/"
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
