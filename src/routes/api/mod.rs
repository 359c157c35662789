pub mod candidates;
pub mod interviews;
pub mod sessions;

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::{delete, get, post, put};

use crate::auth::require_session;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        // Candidates
        .route("/candidates", get(candidates::list))
        .route("/candidates/facets", get(candidates::facets))
        .route(
            "/candidates/{id}",
            get(candidates::get).put(candidates::update),
        )
        // Interview requests
        .route(
            "/interviews",
            get(interviews::list).post(interviews::create),
        )
        .route("/interviews/{id}", put(interviews::update))
        // Sessions
        .route("/sessions/current", delete(sessions::sign_out))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    let public = Router::new().route("/sessions", post(sessions::sign_in));

    Router::new()
        .nest("/api/v1", public.merge(protected))
        .with_state(state)
}
