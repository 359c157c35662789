use std::sync::Arc;

use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::Html;
use serde::Deserialize;

use crate::error::AppError;
use crate::models::candidate::CandidateRecord;
use crate::search::{self, SearchCriteria, SortKey};
use crate::state::AppState;

const PER_PAGE: usize = 6;
const AVAILABILITY_ORDER: [&str; 4] = ["Immediate", "2 Weeks", "1 Month", "3 Months"];

#[derive(Template)]
#[template(path = "candidates/list.html")]
struct CandidateListTemplate {
    candidates: Vec<CandidateRecord>,
    search: String,
    skill: String,
    availability: String,
    sort: String,
    total_count: usize,
    pages: Vec<PageLink>,
    all_skills: Vec<String>,
    all_availabilities: Vec<String>,
}

struct PageLink {
    number: i64,
    current: bool,
}

#[derive(Template)]
#[template(path = "candidates/detail.html")]
struct CandidateDetailTemplate {
    candidate: CandidateRecord,
}

#[derive(Debug, Deserialize)]
pub struct CandidateListQuery {
    pub search: Option<String>,
    pub skill: Option<String>,
    pub availability: Option<String>,
    pub sort: Option<String>,
    pub page: Option<i64>,
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CandidateListQuery>,
) -> Result<Html<String>, AppError> {
    let sort = query
        .sort
        .as_deref()
        .and_then(SortKey::parse)
        .unwrap_or_default();
    let criteria = SearchCriteria {
        term: query.search.clone().filter(|s| !s.is_empty()),
        required_skills: query
            .skill
            .clone()
            .filter(|s| !s.is_empty())
            .into_iter()
            .collect(),
        availability: query.availability.clone().filter(|s| !s.is_empty()),
        sort,
        availability_order: AVAILABILITY_ORDER.iter().map(|s| s.to_string()).collect(),
        page: query.page.unwrap_or(1),
        page_size: PER_PAGE,
        ..Default::default()
    };
    let result = search::search(state.catalog.all(), &criteria);
    let facets = search::extract_facets(state.catalog.all());

    let mut all_availabilities: Vec<String> = state
        .catalog
        .all()
        .iter()
        .map(|c| c.availability.clone())
        .collect();
    all_availabilities.sort_by_key(|a| {
        AVAILABILITY_ORDER
            .iter()
            .position(|v| *v == a.as_str())
            .unwrap_or(usize::MAX)
    });
    all_availabilities.dedup();

    let tmpl = CandidateListTemplate {
        candidates: result.items.into_iter().cloned().collect(),
        search: query.search.unwrap_or_default(),
        skill: query.skill.unwrap_or_default(),
        availability: query.availability.unwrap_or_default(),
        sort: query.sort.unwrap_or_else(|| "name".to_string()),
        total_count: result.total_count,
        pages: (1..=result.total_pages as i64)
            .map(|number| PageLink {
                number,
                current: number == result.page,
            })
            .collect(),
        all_skills: facets.skills,
        all_availabilities,
    };
    Ok(Html(
        tmpl.render()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    ))
}

pub async fn detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let candidate = state
        .catalog
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))?;
    let tmpl = CandidateDetailTemplate {
        candidate: candidate.clone(),
    };
    Ok(Html(
        tmpl.render()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    ))
}
