use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::catalog::CandidateSource;
use crate::error::AppError;
use crate::models::candidate::{CandidateRecord, UpdateProfile};

/// Error payload shape the profile service returns.
#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    message: Option<String>,
}

/// An attachment already validated locally, ready to forward.
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Thin client for the external profile service. The portal holds no
/// profile state of its own; reads fall back to it and writes pass
/// through it, carrying the caller's bearer token.
#[derive(Clone)]
pub struct ProfileClient {
    client: reqwest::Client,
    base_url: String,
}

impl ProfileClient {
    pub fn new(base_url: String) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(ProfileClient { client, base_url })
    }

    pub async fn list_candidates(&self) -> Result<Vec<CandidateRecord>, AppError> {
        let response = self
            .client
            .get(format!("{}/api/candidates", self.base_url))
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to fetch candidates: {e}")))?;
        if !response.status().is_success() {
            return Err(AppError::Upstream("Failed to fetch candidates".to_string()));
        }
        response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Malformed candidate list: {e}")))
    }

    /// GET one profile by id. Failure surfaces as a generic load error;
    /// there is no automatic retry.
    pub async fn fetch_candidate(
        &self,
        id: &str,
        bearer: &str,
    ) -> Result<CandidateRecord, AppError> {
        let response = self
            .client
            .get(format!("{}/api/candidates/{id}", self.base_url))
            .bearer_auth(bearer)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to fetch profile: {e}")))?;

        match response.status() {
            StatusCode::UNAUTHORIZED => Err(AppError::Unauthorized),
            StatusCode::NOT_FOUND => Err(AppError::NotFound(format!("Candidate {id} not found"))),
            s if s.is_success() => response
                .json()
                .await
                .map_err(|e| AppError::Upstream(format!("Malformed profile: {e}"))),
            _ => Err(AppError::Upstream("Failed to fetch profile".to_string())),
        }
    }

    /// PUT one profile: JSON part plus optional photo/resume parts, all
    /// validated locally before this call. The service's `message`
    /// field is surfaced verbatim when present.
    pub async fn update_candidate(
        &self,
        id: &str,
        bearer: &str,
        profile: &UpdateProfile,
        photo: Option<Attachment>,
        resume: Option<Attachment>,
    ) -> Result<CandidateRecord, AppError> {
        let profile_json = serde_json::to_string(profile)
            .map_err(|e| AppError::Internal(format!("Failed to encode profile: {e}")))?;
        let mut form = Form::new().text("profile", profile_json);
        for (name, attachment) in [("photo", photo), ("resume", resume)] {
            if let Some(a) = attachment {
                let part = Part::bytes(a.bytes)
                    .file_name(a.file_name)
                    .mime_str(&a.content_type)
                    .map_err(|e| AppError::Internal(format!("Bad attachment type: {e}")))?;
                form = form.part(name, part);
            }
        }

        let response = self
            .client
            .put(format!("{}/api/candidates/{id}", self.base_url))
            .bearer_auth(bearer)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to update profile: {e}")))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(AppError::Unauthorized);
        }
        if !status.is_success() {
            let message = response
                .json::<UpstreamErrorBody>()
                .await
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| "Failed to update profile".to_string());
            return Err(AppError::Upstream(message));
        }
        response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Malformed profile: {e}")))
    }
}

/// Catalog source backed by the profile service's list endpoint.
pub struct UpstreamSource {
    pub client: ProfileClient,
}

#[async_trait]
impl CandidateSource for UpstreamSource {
    fn name(&self) -> &str {
        "upstream"
    }

    async fn load(&self) -> Result<Vec<CandidateRecord>, AppError> {
        self.client.list_candidates().await
    }
}
