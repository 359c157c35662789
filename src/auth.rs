use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::error::AppError;
use crate::state::AppState;

/// Hash a raw bearer token for storage/lookup.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Generate a new random bearer token.
pub fn generate_token() -> String {
    use rand::Rng;
    let bytes: [u8; 32] = rand::rng().random();
    hex::encode(bytes)
}

#[derive(Debug, Clone)]
pub struct Session {
    pub user: String,
    pub created_at: DateTime<Utc>,
}

/// In-memory session registry keyed by token hash. The real identity
/// provider is an external collaborator; this mirrors the mock token
/// flow the portal ships with.
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh token for `user` and return the raw value. Only
    /// the hash is retained.
    pub fn issue(&self, user: &str) -> String {
        let raw = generate_token();
        self.insert_raw(user, &raw);
        raw
    }

    /// Register a caller-chosen token (config bootstrap).
    pub fn insert_raw(&self, user: &str, raw_token: &str) {
        let session = Session {
            user: user.to_string(),
            created_at: Utc::now(),
        };
        self.sessions
            .lock()
            .expect("session store poisoned")
            .insert(hash_token(raw_token), session);
    }

    pub fn validate(&self, raw_token: &str) -> Option<Session> {
        self.sessions
            .lock()
            .expect("session store poisoned")
            .get(&hash_token(raw_token))
            .cloned()
    }

    /// Drop the session for the given raw token. Also used on upstream
    /// 401 so an expired session cannot be replayed locally.
    pub fn revoke(&self, raw_token: &str) -> bool {
        self.sessions
            .lock()
            .expect("session store poisoned")
            .remove(&hash_token(raw_token))
            .is_some()
    }
}

/// The validated raw bearer token, stashed in request extensions so
/// proxy handlers can forward it upstream.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

/// Middleware that validates the Bearer token against the session store.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    // Owned copy so the header borrow ends before the request is
    // mutated below.
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AppError::Unauthorized)?
        .to_string();

    if state.sessions.validate(&token).is_none() {
        return Err(AppError::Unauthorized);
    }

    request.extensions_mut().insert(BearerToken(token));
    Ok(next.run(request).await)
}
