use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Multipart, Path, Query, State};
use serde::{Deserialize, Serialize};

use crate::auth::BearerToken;
use crate::error::AppError;
use crate::models::candidate::{CandidateRecord, UpdateProfile};
use crate::search::{self, Facets, SearchCriteria, SortDirection, SortKey};
use crate::state::AppState;
use crate::upload;
use crate::upstream::Attachment;

/// Rank table used when the caller does not supply one. Matches the
/// candidate-browsing page; the marketplace page passes its own.
const DEFAULT_AVAILABILITY_ORDER: [&str; 4] = ["Immediate", "2 Weeks", "1 Month", "3 Months"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateListQuery {
    pub search: Option<String>,
    /// Comma-separated; a candidate must carry every listed skill.
    pub skills: Option<String>,
    pub min_experience: Option<u32>,
    pub max_rate: Option<f64>,
    pub availability: Option<String>,
    pub location: Option<String>,
    /// One of name, experience, rate, availability.
    pub sort: Option<String>,
    /// "asc" or "desc"; applies to the rate sort only.
    pub direction: Option<String>,
    /// Comma-separated rank table for the availability sort.
    pub availability_order: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<usize>,
}

/// Owned page of results for the wire; the engine's borrowed view is
/// cloned out so the response outlives the request state.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidatePage {
    pub items: Vec<CandidateRecord>,
    pub total_count: usize,
    pub total_pages: usize,
    pub page: i64,
    pub page_size: usize,
}

pub fn criteria_from_query(query: &CandidateListQuery) -> Result<SearchCriteria, AppError> {
    let sort = match query.sort.as_deref() {
        None => SortKey::default(),
        Some(s) => SortKey::parse(s)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown sort key {s:?}")))?,
    };
    let rate_direction = match query.direction.as_deref() {
        None | Some("asc") => SortDirection::Ascending,
        Some("desc") => SortDirection::Descending,
        Some(d) => {
            return Err(AppError::BadRequest(format!("Unknown sort direction {d:?}")));
        }
    };
    let availability_order = match &query.availability_order {
        Some(raw) => split_csv(raw),
        None => DEFAULT_AVAILABILITY_ORDER
            .iter()
            .map(|s| s.to_string())
            .collect(),
    };

    Ok(SearchCriteria {
        term: query.search.clone().filter(|s| !s.is_empty()),
        required_skills: query.skills.as_deref().map(split_csv).unwrap_or_default(),
        min_experience: query.min_experience,
        max_rate: query.max_rate,
        availability: query.availability.clone().filter(|s| !s.is_empty()),
        location: query.location.clone().filter(|s| !s.is_empty()),
        sort,
        rate_direction,
        availability_order,
        page: query.page.unwrap_or(1),
        page_size: query.page_size.unwrap_or(50).min(100),
    })
}

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CandidateListQuery>,
) -> Result<Json<CandidatePage>, AppError> {
    let criteria = criteria_from_query(&query)?;
    let result = search::search(state.catalog.all(), &criteria);
    Ok(Json(CandidatePage {
        items: result.items.into_iter().cloned().collect(),
        total_count: result.total_count,
        total_pages: result.total_pages,
        page: result.page,
        page_size: result.page_size,
    }))
}

pub async fn facets(State(state): State<Arc<AppState>>) -> Json<Facets> {
    Json(search::extract_facets(state.catalog.all()))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    Extension(bearer): Extension<BearerToken>,
    Path(id): Path<String>,
) -> Result<Json<CandidateRecord>, AppError> {
    if let Some(candidate) = state.catalog.get(&id) {
        return Ok(Json(candidate.clone()));
    }
    // Not in the local catalog; fall through to the profile service.
    match &state.upstream {
        Some(client) => {
            let candidate = client
                .fetch_candidate(&id, &bearer.0)
                .await
                .map_err(|e| expire_session_on_401(&state, &bearer, e))?;
            Ok(Json(candidate))
        }
        None => Err(AppError::NotFound(format!("Candidate {id} not found"))),
    }
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Extension(bearer): Extension<BearerToken>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<CandidateRecord>, AppError> {
    let mut profile: Option<UpdateProfile> = None;
    let mut photo: Option<Attachment> = None;
    let mut resume: Option<Attachment> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "profile" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Unreadable profile part: {e}")))?;
                profile = Some(
                    serde_json::from_str(&raw)
                        .map_err(|e| AppError::BadRequest(format!("Invalid profile JSON: {e}")))?,
                );
            }
            "photo" => {
                let content_type = field.content_type().unwrap_or_default().to_string();
                let file_name = field.file_name().unwrap_or("photo").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Unreadable photo part: {e}")))?;
                upload::validate_photo(&content_type, &bytes)?;
                photo = Some(Attachment {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            "resume" => {
                let content_type = field.content_type().unwrap_or_default().to_string();
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Unreadable resume part: {e}")))?;
                upload::validate_resume(&content_type, &file_name, &bytes)?;
                resume = Some(Attachment {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    let profile =
        profile.ok_or_else(|| AppError::BadRequest("Missing profile part".to_string()))?;

    let client = state
        .upstream
        .as_ref()
        .ok_or_else(|| AppError::Upstream("Profile service not configured".to_string()))?;
    let updated = client
        .update_candidate(&id, &bearer.0, &profile, photo, resume)
        .await
        .map_err(|e| expire_session_on_401(&state, &bearer, e))?;
    Ok(Json(updated))
}

/// An upstream 401 means the session is dead; drop it locally so the
/// client is sent back to sign-in instead of retrying a bad token.
fn expire_session_on_401(state: &AppState, bearer: &BearerToken, err: AppError) -> AppError {
    if matches!(err, AppError::Unauthorized) {
        state.sessions.revoke(&bearer.0);
        tracing::info!("Session expired upstream, revoked locally");
    }
    err
}
