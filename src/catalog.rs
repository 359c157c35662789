use async_trait::async_trait;

use crate::error::AppError;
use crate::models::candidate::CandidateRecord;

/// Trait for anything that can produce the candidate collection at
/// startup. The collection is loaded once per session and treated as
/// read-only afterwards; search only produces views over it.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Human-readable name for log lines.
    fn name(&self) -> &str;

    async fn load(&self) -> Result<Vec<CandidateRecord>, AppError>;
}

/// Loads the candidate collection from a JSON fixture file.
pub struct FixtureSource {
    pub path: String,
}

#[async_trait]
impl CandidateSource for FixtureSource {
    fn name(&self) -> &str {
        "fixture"
    }

    async fn load(&self) -> Result<Vec<CandidateRecord>, AppError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to read {}: {e}", self.path)))?;
        let candidates: Vec<CandidateRecord> = serde_json::from_str(&raw)
            .map_err(|e| AppError::Internal(format!("Failed to parse {}: {e}", self.path)))?;
        Ok(candidates)
    }
}

/// Read-only candidate collection shared across requests.
pub struct Catalog {
    candidates: Vec<CandidateRecord>,
}

impl Catalog {
    pub fn new(candidates: Vec<CandidateRecord>) -> Self {
        Catalog { candidates }
    }

    /// Load from the given source, degrading to an empty catalog on
    /// failure. Failures are not retried; browsing stays usable with an
    /// empty list.
    pub async fn load(source: &dyn CandidateSource) -> Self {
        match source.load().await {
            Ok(candidates) => {
                tracing::info!(
                    source = source.name(),
                    count = candidates.len(),
                    "Candidate catalog loaded"
                );
                Catalog::new(candidates)
            }
            Err(e) => {
                tracing::error!(source = source.name(), "Candidate catalog load failed: {e}");
                Catalog::new(Vec::new())
            }
        }
    }

    pub fn all(&self) -> &[CandidateRecord] {
        &self.candidates
    }

    pub fn get(&self, id: &str) -> Option<&CandidateRecord> {
        self.candidates.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
