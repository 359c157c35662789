use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, State};
use serde::{Deserialize, Serialize};

use crate::auth::BearerToken;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignIn {
    pub user: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedSession {
    pub user: String,
    pub token: String,
}

/// Mock sign-in: issues a bearer token for the named user. The real
/// identity provider lives outside this portal.
pub async fn sign_in(
    State(state): State<Arc<AppState>>,
    Json(input): Json<SignIn>,
) -> Json<CreatedSession> {
    let token = state.sessions.issue(&input.user);
    tracing::info!(user = %input.user, "Session issued");
    Json(CreatedSession {
        user: input.user,
        token,
    })
}

pub async fn sign_out(
    State(state): State<Arc<AppState>>,
    Extension(bearer): Extension<BearerToken>,
) -> Json<serde_json::Value> {
    let revoked = state.sessions.revoke(&bearer.0);
    Json(serde_json::json!({ "revoked": revoked }))
}
