use serde::{Deserialize, Serialize};

/// One job-seeker profile. Loaded once at startup and treated as
/// read-only for the rest of the session; search only ever produces
/// filtered views of the collection.
///
/// `availability` is a plain string because the two browsing surfaces
/// use different value sets ({Immediate, 2 Weeks, 1 Month, 3 Months}
/// vs {Full-time, Part-time, Contract}); the sort rank table comes
/// from the caller, never from this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub location: String,
    pub skills: Vec<String>,
    pub years_of_experience: u32,
    pub hourly_rate: f64,
    pub availability: String,
    pub preferred_work_type: WorkType,

    // Display-only attributes, carried through unfiltered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<FileRef>,
}

impl CandidateRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRef {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkType {
    Remote,
    Hybrid,
    #[serde(rename = "On-site")]
    OnSite,
}

/// Partial profile edit accepted on PUT and forwarded upstream.
/// Unset fields are left untouched by the profile service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub location: Option<String>,
    pub skills: Option<Vec<String>>,
    pub years_of_experience: Option<u32>,
    pub hourly_rate: Option<f64>,
    pub availability: Option<String>,
    pub preferred_work_type: Option<WorkType>,
    pub experience: Option<String>,
    pub bio: Option<String>,
    pub portfolio: Option<String>,
    pub education: Option<String>,
    pub certifications: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
}
