use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::Utc;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::interview::{
    CreateInterviewRequest, InterviewFilters, InterviewRequest, UpdateInterviewRequest,
};
use crate::state::AppState;

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(filters): Query<InterviewFilters>,
) -> Json<Vec<InterviewRequest>> {
    let interviews = state.interviews.lock().expect("interview store poisoned");
    let result = interviews
        .iter()
        .filter(|r| filters.status.is_none_or(|s| r.status == s))
        .cloned()
        .collect();
    Json(result)
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CreateInterviewRequest>,
) -> Result<Json<InterviewRequest>, AppError> {
    if state.catalog.get(&input.candidate_id).is_none() {
        return Err(AppError::NotFound(format!(
            "Candidate {} not found",
            input.candidate_id
        )));
    }
    if input.message.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Interview request message must not be empty".to_string(),
        ));
    }

    let request = InterviewRequest::new(input);
    state
        .interviews
        .lock()
        .expect("interview store poisoned")
        .push(request.clone());
    tracing::info!(candidate_id = %request.candidate_id, "Interview request created");
    Ok(Json(request))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateInterviewRequest>,
) -> Result<Json<InterviewRequest>, AppError> {
    let mut interviews = state.interviews.lock().expect("interview store poisoned");
    let request = interviews
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Interview request {id} not found")))?;
    request.status = input.status;
    request.updated_at = Utc::now();
    Ok(Json(request.clone()))
}
