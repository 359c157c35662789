use std::sync::Mutex;

use crate::auth::SessionStore;
use crate::catalog::Catalog;
use crate::models::interview::InterviewRequest;
use crate::upstream::ProfileClient;

/// Everything the routers share. Built once by the composition root in
/// `main` and passed around explicitly; nothing in here is a lazily
/// initialized global.
pub struct AppState {
    /// Read-only after load.
    pub catalog: Catalog,
    pub sessions: SessionStore,
    /// Mock interview-request inbox; the real backend is external.
    pub interviews: Mutex<Vec<InterviewRequest>>,
    /// Unset when the portal runs catalog-only, without a profile
    /// service behind it.
    pub upstream: Option<ProfileClient>,
}

impl AppState {
    pub fn new(catalog: Catalog, upstream: Option<ProfileClient>) -> Self {
        AppState {
            catalog,
            sessions: SessionStore::new(),
            interviews: Mutex::new(Vec::new()),
            upstream,
        }
    }
}
