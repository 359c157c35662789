use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InterviewStatus {
    Pending,
    Accepted,
    Declined,
}

/// An employer's request to interview a candidate. Held in memory only;
/// the real interview backend is an external collaborator.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRequest {
    pub id: Uuid,
    pub candidate_id: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposed_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposed_rate: Option<f64>,
    pub status: InterviewStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInterviewRequest {
    pub candidate_id: String,
    pub message: String,
    pub proposed_date: Option<String>,
    pub proposed_rate: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateInterviewRequest {
    pub status: InterviewStatus,
}

#[derive(Debug, Deserialize)]
pub struct InterviewFilters {
    pub status: Option<InterviewStatus>,
}

impl InterviewRequest {
    pub fn new(input: CreateInterviewRequest) -> Self {
        let now = Utc::now();
        InterviewRequest {
            id: Uuid::new_v4(),
            candidate_id: input.candidate_id,
            message: input.message,
            proposed_date: input.proposed_date,
            proposed_rate: input.proposed_rate,
            status: InterviewStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}
