pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod search;
pub mod state;
pub mod upload;
pub mod upstream;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

async fn readyz(state: Arc<AppState>) -> impl IntoResponse {
    if state.catalog.is_empty() {
        (StatusCode::SERVICE_UNAVAILABLE, "not ready")
    } else {
        (StatusCode::OK, "ready")
    }
}

/// Assemble the full application router around an explicitly
/// constructed state instance.
pub fn app(state: Arc<AppState>) -> Router {
    let readyz_state = state.clone();
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(move || readyz(readyz_state.clone())))
        .merge(routes::ui::router(state.clone()))
        .merge(routes::api::router(state))
        // Room for the profile JSON plus two 5MB attachments.
        .layer(DefaultBodyLimit::max(12 * 1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
