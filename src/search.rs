//! Pure candidate search: filter, sort, paginate.
//!
//! The engine never mutates the collection it is given; every call
//! produces a fresh view, so calling it twice with the same arguments
//! yields identical output. It is evaluated synchronously per request
//! and is sized for in-memory catalogs (tens to low hundreds of
//! records), not for large-scale indexing.

use serde::Serialize;

use crate::models::candidate::CandidateRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Experience,
    Rate,
    Availability,
}

impl SortKey {
    pub fn parse(s: &str) -> Option<SortKey> {
        match s {
            "name" => Some(SortKey::Name),
            "experience" => Some(SortKey::Experience),
            "rate" => Some(SortKey::Rate),
            "availability" => Some(SortKey::Availability),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// One search query. Built fresh per request; every filter is optional
/// and a no-op when unset.
///
/// The two browsing surfaces disagree on the rate sort direction and on
/// the availability value set, so both are explicit caller
/// configuration here rather than defaults baked into the engine.
#[derive(Debug, Clone, Default)]
pub struct SearchCriteria {
    /// Case-insensitive substring match against full name, any skill,
    /// or location.
    pub term: Option<String>,
    /// Conjunctive: a record must carry every listed skill.
    pub required_skills: Vec<String>,
    /// Inclusive lower bound on years of experience.
    pub min_experience: Option<u32>,
    /// Inclusive upper bound on hourly rate.
    pub max_rate: Option<f64>,
    pub availability: Option<String>,
    pub location: Option<String>,
    pub sort: SortKey,
    /// Applies to `SortKey::Rate` only.
    pub rate_direction: SortDirection,
    /// Rank table for `SortKey::Availability`; values not in the table
    /// sort last.
    pub availability_order: Vec<String>,
    /// 1-based; values below 1 are clamped to 1.
    pub page: i64,
    pub page_size: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PagedResult<'a> {
    pub items: Vec<&'a CandidateRecord>,
    pub total_count: usize,
    pub total_pages: usize,
    pub page: i64,
    pub page_size: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Facets {
    pub skills: Vec<String>,
    pub locations: Vec<String>,
}

/// Filter, sort, and paginate the collection per `criteria`.
pub fn search<'a>(collection: &'a [CandidateRecord], criteria: &SearchCriteria) -> PagedResult<'a> {
    let mut filtered: Vec<&CandidateRecord> = collection
        .iter()
        .filter(|c| matches_term(c, criteria.term.as_deref()))
        .filter(|c| has_all_skills(c, &criteria.required_skills))
        .filter(|c| {
            criteria
                .min_experience
                .is_none_or(|min| c.years_of_experience >= min)
        })
        .filter(|c| criteria.max_rate.is_none_or(|max| c.hourly_rate <= max))
        .filter(|c| {
            criteria
                .availability
                .as_deref()
                .is_none_or(|a| c.availability == a)
        })
        .filter(|c| criteria.location.as_deref().is_none_or(|l| c.location == l))
        .collect();

    // sort_by is stable, so ties keep the collection's order.
    match criteria.sort {
        SortKey::Name => {
            filtered.sort_by_key(|c| c.full_name().to_lowercase());
        }
        SortKey::Experience => {
            filtered.sort_by(|a, b| b.years_of_experience.cmp(&a.years_of_experience));
        }
        SortKey::Rate => {
            filtered.sort_by(|a, b| {
                let ord = a.hourly_rate.total_cmp(&b.hourly_rate);
                match criteria.rate_direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }
        SortKey::Availability => {
            filtered.sort_by_key(|c| availability_rank(c, &criteria.availability_order));
        }
    }

    let total_count = filtered.len();
    let page_size = criteria.page_size.max(1);
    let total_pages = total_count.div_ceil(page_size);
    let page = criteria.page.max(1);
    let offset = (page as usize - 1).saturating_mul(page_size);

    let items = if offset >= total_count {
        Vec::new()
    } else {
        filtered[offset..(offset + page_size).min(total_count)].to_vec()
    };

    PagedResult {
        items,
        total_count,
        total_pages,
        page,
        page_size,
    }
}

/// Deduplicated skill and location vocabularies for filter controls.
/// Sorted here only for deterministic display; no order is promised.
pub fn extract_facets(collection: &[CandidateRecord]) -> Facets {
    let mut skills: Vec<String> = collection
        .iter()
        .flat_map(|c| c.skills.iter().cloned())
        .collect();
    skills.sort();
    skills.dedup();

    let mut locations: Vec<String> = collection.iter().map(|c| c.location.clone()).collect();
    locations.sort();
    locations.dedup();

    Facets { skills, locations }
}

fn matches_term(c: &CandidateRecord, term: Option<&str>) -> bool {
    let Some(term) = term else { return true };
    let needle = term.to_lowercase();
    c.full_name().to_lowercase().contains(&needle)
        || c.skills
            .iter()
            .any(|s| s.to_lowercase().contains(&needle))
        || c.location.to_lowercase().contains(&needle)
}

fn has_all_skills(c: &CandidateRecord, required: &[String]) -> bool {
    required.iter().all(|r| c.skills.iter().any(|s| s == r))
}

fn availability_rank(c: &CandidateRecord, order: &[String]) -> usize {
    order
        .iter()
        .position(|v| *v == c.availability)
        .unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::WorkType;

    fn sample() -> Vec<CandidateRecord> {
        serde_json::from_str(include_str!("../data/candidates.json")).unwrap()
    }

    fn availability_order() -> Vec<String> {
        ["Immediate", "2 Weeks", "1 Month", "3 Months"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn criteria() -> SearchCriteria {
        SearchCriteria {
            page: 1,
            page_size: 50,
            ..Default::default()
        }
    }

    #[test]
    fn unset_filters_return_everything() {
        let candidates = sample();
        let result = search(&candidates, &criteria());
        assert_eq!(result.total_count, 12);
        assert_eq!(result.total_pages, 1);
        assert_eq!(result.items.len(), 12);
    }

    #[test]
    fn term_and_skill_filter_is_conjunctive() {
        let candidates = sample();
        let result = search(
            &candidates,
            &SearchCriteria {
                term: Some("react".to_string()),
                required_skills: vec!["TypeScript".to_string()],
                ..criteria()
            },
        );
        // "react" matches John Doe (React), Lisa Anderson (React Native),
        // Alex Chen... only John Doe also carries TypeScript.
        assert_eq!(result.total_count, 1);
        assert_eq!(result.items[0].id, "1");
        assert_eq!(result.items[0].full_name(), "John Doe");
    }

    #[test]
    fn missing_one_required_skill_excludes() {
        let candidates = sample();
        let result = search(
            &candidates,
            &SearchCriteria {
                required_skills: vec!["React".to_string(), "Python".to_string()],
                ..criteria()
            },
        );
        // John Doe has React but not Python, Sarah Smith the reverse.
        assert_eq!(result.total_count, 0);
    }

    #[test]
    fn term_matches_location_case_insensitively() {
        let candidates = sample();
        let result = search(
            &candidates,
            &SearchCriteria {
                term: Some("SAN FRANCISCO".to_string()),
                ..criteria()
            },
        );
        // Name sort applies: James Wilson before John Doe.
        let ids: Vec<&str> = result.items.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["9", "1"]);
    }

    #[test]
    fn rate_sort_ascending_starts_at_lowest() {
        let candidates = sample();
        let result = search(
            &candidates,
            &SearchCriteria {
                sort: SortKey::Rate,
                ..criteria()
            },
        );
        assert_eq!(result.items[0].full_name(), "Alex Chen");
        assert_eq!(result.items[0].hourly_rate, 85.0);
        // Pinned against the literal fixture: 85, 90, 95, 95, 100, 110,
        // 120, 125, 130, 140, 150, 160 with the two 95s in input order.
        let ids: Vec<&str> = result.items.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            ids,
            ["7", "2", "8", "12", "4", "6", "1", "10", "5", "9", "3", "11"]
        );
    }

    #[test]
    fn rate_sort_direction_is_caller_configured() {
        let candidates = sample();
        let result = search(
            &candidates,
            &SearchCriteria {
                sort: SortKey::Rate,
                rate_direction: SortDirection::Descending,
                ..criteria()
            },
        );
        assert_eq!(result.items[0].hourly_rate, 160.0);
        assert_eq!(result.items.last().unwrap().hourly_rate, 85.0);
    }

    #[test]
    fn experience_sort_is_descending_and_stable() {
        let candidates = sample();
        let result = search(
            &candidates,
            &SearchCriteria {
                sort: SortKey::Experience,
                ..criteria()
            },
        );
        let ids: Vec<&str> = result.items.iter().map(|c| c.id.as_str()).collect();
        // Equal years keep input order: 1 before 8 before 10 (5 years),
        // 2 before 7 before 12 (3 years).
        assert_eq!(
            ids,
            ["3", "5", "11", "1", "8", "10", "4", "6", "9", "2", "7", "12"]
        );
    }

    #[test]
    fn availability_sort_uses_caller_rank_table() {
        let candidates = sample();
        let result = search(
            &candidates,
            &SearchCriteria {
                sort: SortKey::Availability,
                availability_order: availability_order(),
                ..criteria()
            },
        );
        let ranks: Vec<&str> = result
            .items
            .iter()
            .map(|c| c.availability.as_str())
            .collect();
        let mut expected = ranks.clone();
        expected.sort_by_key(|a| {
            ["Immediate", "2 Weeks", "1 Month", "3 Months"]
                .iter()
                .position(|v| v == a)
        });
        assert_eq!(ranks, expected);
        assert_eq!(result.items[0].availability, "Immediate");
    }

    #[test]
    fn unknown_availability_sorts_last() {
        let mut candidates = sample();
        candidates[0].availability = "Sabbatical".to_string();
        let result = search(
            &candidates,
            &SearchCriteria {
                sort: SortKey::Availability,
                availability_order: availability_order(),
                ..criteria()
            },
        );
        assert_eq!(result.items.last().unwrap().id, "1");
    }

    #[test]
    fn search_is_pure_and_idempotent() {
        let candidates = sample();
        let crit = SearchCriteria {
            term: Some("developer".to_string()),
            sort: SortKey::Rate,
            ..criteria()
        };
        let before = candidates.clone();
        let a = search(&candidates, &crit);
        let b = search(&candidates, &crit);
        assert_eq!(a, b);
        assert_eq!(candidates, before);
    }

    #[test]
    fn concatenated_pages_reproduce_the_full_sequence() {
        let candidates = sample();
        let full = search(
            &candidates,
            &SearchCriteria {
                page_size: 100,
                ..criteria()
            },
        );
        let mut concatenated = Vec::new();
        let paged_criteria = |page| SearchCriteria {
            page,
            page_size: 5,
            ..criteria()
        };
        let first = search(&candidates, &paged_criteria(1));
        assert_eq!(first.total_pages, 3);
        for page in 1..=first.total_pages as i64 {
            concatenated.extend(search(&candidates, &paged_criteria(page)).items);
        }
        assert_eq!(concatenated, full.items);
    }

    #[test]
    fn page_past_the_end_is_empty_not_an_error() {
        let candidates = sample();
        let result = search(
            &candidates,
            &SearchCriteria {
                max_rate: Some(95.0),
                page: 2,
                page_size: 6,
                ..criteria()
            },
        );
        assert_eq!(result.total_count, 4);
        assert_eq!(result.total_pages, 1);
        assert!(result.items.is_empty());
    }

    #[test]
    fn negative_page_is_clamped_to_first() {
        let candidates = sample();
        let result = search(
            &candidates,
            &SearchCriteria {
                page: -3,
                page_size: 6,
                ..criteria()
            },
        );
        assert_eq!(result.page, 1);
        assert_eq!(result.items.len(), 6);
    }

    #[test]
    fn experience_floor_and_rate_ceiling_are_inclusive() {
        let candidates = sample();
        let result = search(
            &candidates,
            &SearchCriteria {
                min_experience: Some(5),
                max_rate: Some(120.0),
                ..criteria()
            },
        );
        for c in &result.items {
            assert!(c.years_of_experience >= 5);
            assert!(c.hourly_rate <= 120.0);
        }
        // John Doe sits exactly on both bounds.
        assert!(result.items.iter().any(|c| c.id == "1"));
    }

    #[test]
    fn exact_match_filters() {
        let candidates = sample();
        let result = search(
            &candidates,
            &SearchCriteria {
                availability: Some("1 Month".to_string()),
                location: Some("Denver, CO".to_string()),
                ..criteria()
            },
        );
        assert_eq!(result.total_count, 1);
        assert_eq!(result.items[0].id, "8");
    }

    #[test]
    fn facets_deduplicate() {
        let candidates = sample();
        let facets = extract_facets(&candidates);
        // Unity appears on both Sophie Chen and Isabella Rodriguez.
        assert_eq!(facets.skills.iter().filter(|s| *s == "Unity").count(), 1);
        // San Francisco appears on John Doe and James Wilson.
        assert_eq!(
            facets
                .locations
                .iter()
                .filter(|l| *l == "San Francisco, CA")
                .count(),
            1
        );
        assert!(facets.skills.contains(&"TypeScript".to_string()));
    }

    #[test]
    fn sample_data_shape_survives_deserialization() {
        let candidates = sample();
        assert_eq!(candidates.len(), 12);
        assert_eq!(candidates[0].preferred_work_type, WorkType::Remote);
        assert_eq!(candidates[2].preferred_work_type, WorkType::OnSite);
        assert_eq!(
            candidates[8].certifications.as_deref().unwrap()[0],
            "Certified Blockchain Developer"
        );
    }
}
