//! Query-string parsing for job search.
//!
//! The wire format is loose (comma-joined lists, stringly numbers);
//! this module turns it into a typed [`JobFilter`] exactly once, at
//! the boundary. Numeric fields fall back to defaults when they do not
//! parse; enum-valued fields reject unknown values instead of passing
//! them through to the store.

use std::str::FromStr;

use serde::Deserialize;

use hirelink_models::{JobFilter, JobType, PageParams, SortOrder, WorkMode, DEFAULT_LIMIT};

use crate::error::ApiError;

/// Raw `GET /jobs` query parameters, all optional strings.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawJobQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub roles: Option<String>,
    pub skills: Option<String>,
    pub job_type: Option<String>,
    pub location: Option<String>,
    pub work_mode: Option<String>,
    pub department: Option<String>,
    pub company_type: Option<String>,
    pub salary_min: Option<String>,
    pub salary_max: Option<String>,
    pub min_experience: Option<String>,
    pub max_experience: Option<String>,
    pub company: Option<String>,
    pub posted_date: Option<String>,
}

/// Split a comma-joined list parameter: trim tokens, drop empty ones.
/// An empty result means "no filter".
fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Parse a comma-joined list into enum values, rejecting unknown ones.
fn parse_enum_list<T: FromStr>(value: Option<&str>, field: &str) -> Result<Vec<T>, ApiError> {
    split_list(value)
        .iter()
        .map(|token| {
            token
                .parse()
                .map_err(|_| ApiError::validation(format!("unknown {field} value: {token}")))
        })
        .collect()
}

/// Lenient numeric parse: anything that is not a clean number is
/// treated as absent.
fn parse_num<T: FromStr>(value: Option<&str>) -> Option<T> {
    value.and_then(|s| s.trim().parse().ok())
}

impl RawJobQuery {
    /// Validate into a typed filter. Only enum-valued list fields can
    /// fail; everything else degrades to its default.
    pub fn into_filter(self) -> Result<JobFilter, ApiError> {
        let job_types = parse_enum_list::<JobType>(self.job_type.as_deref(), "jobType")?;
        let work_modes = parse_enum_list::<WorkMode>(self.work_mode.as_deref(), "workMode")?;

        let page = parse_num(self.page.as_deref()).unwrap_or(1);
        let limit = parse_num(self.limit.as_deref()).unwrap_or(DEFAULT_LIMIT);

        let sort = match self.posted_date.as_deref() {
            Some("oldest") => SortOrder::Oldest,
            _ => SortOrder::Newest,
        };

        Ok(JobFilter {
            roles: split_list(self.roles.as_deref()),
            skills: split_list(self.skills.as_deref()),
            job_types,
            locations: split_list(self.location.as_deref()),
            work_modes,
            departments: split_list(self.department.as_deref()),
            company_types: split_list(self.company_type.as_deref()),
            salary_min: parse_num(self.salary_min.as_deref()),
            salary_max: parse_num(self.salary_max.as_deref()),
            min_experience: parse_num(self.min_experience.as_deref()),
            max_experience: parse_num(self.max_experience.as_deref()),
            company: self
                .company
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            sort,
            page: PageParams::clamped(page, limit),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_gives_default_filter() {
        let filter = RawJobQuery::default().into_filter().unwrap();
        assert_eq!(filter, JobFilter::default());
        assert_eq!(filter.page.page, 1);
        assert_eq!(filter.page.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn list_params_are_split_and_trimmed() {
        let raw = RawJobQuery {
            skills: Some("React, Rust ,,  ".to_string()),
            ..RawJobQuery::default()
        };
        let filter = raw.into_filter().unwrap();
        assert_eq!(filter.skills, vec!["React", "Rust"]);
    }

    #[test]
    fn empty_list_param_means_no_filter() {
        let raw = RawJobQuery {
            roles: Some(" , ,".to_string()),
            ..RawJobQuery::default()
        };
        assert!(raw.into_filter().unwrap().roles.is_empty());
    }

    #[test]
    fn enum_lists_parse_known_values() {
        let raw = RawJobQuery {
            job_type: Some("FULL_TIME,CONTRACT".to_string()),
            work_mode: Some("REMOTE".to_string()),
            ..RawJobQuery::default()
        };
        let filter = raw.into_filter().unwrap();
        assert_eq!(filter.job_types, vec![JobType::FullTime, JobType::Contract]);
        assert_eq!(filter.work_modes, vec![WorkMode::Remote]);
    }

    #[test]
    fn unknown_enum_values_are_rejected() {
        let raw = RawJobQuery {
            job_type: Some("FULL_TIME,CASUAL".to_string()),
            ..RawJobQuery::default()
        };
        assert!(matches!(
            raw.into_filter(),
            Err(ApiError::Validation(msg)) if msg.contains("CASUAL")
        ));
    }

    #[test]
    fn page_and_limit_are_clamped() {
        let raw = RawJobQuery {
            page: Some("0".to_string()),
            limit: Some("1000".to_string()),
            ..RawJobQuery::default()
        };
        let filter = raw.into_filter().unwrap();
        assert_eq!(filter.page.page, 1);
        assert_eq!(filter.page.limit, 100);
    }

    #[test]
    fn malformed_numbers_fall_back_to_defaults() {
        let raw = RawJobQuery {
            page: Some("abc".to_string()),
            limit: Some("NaN".to_string()),
            salary_min: Some("lots".to_string()),
            min_experience: Some("3".to_string()),
            ..RawJobQuery::default()
        };
        let filter = raw.into_filter().unwrap();
        assert_eq!(filter.page.page, 1);
        assert_eq!(filter.page.limit, DEFAULT_LIMIT);
        assert_eq!(filter.salary_min, None);
        assert_eq!(filter.min_experience, Some(3));
    }

    #[test]
    fn posted_date_controls_sort() {
        let oldest = RawJobQuery {
            posted_date: Some("oldest".to_string()),
            ..RawJobQuery::default()
        };
        assert_eq!(oldest.into_filter().unwrap().sort, SortOrder::Oldest);

        let newest = RawJobQuery {
            posted_date: Some("newest".to_string()),
            ..RawJobQuery::default()
        };
        assert_eq!(newest.into_filter().unwrap().sort, SortOrder::Newest);

        assert_eq!(
            RawJobQuery::default().into_filter().unwrap().sort,
            SortOrder::Newest
        );
    }

    #[test]
    fn company_is_trimmed_and_emptied() {
        let raw = RawJobQuery {
            company: Some("  Acme ".to_string()),
            ..RawJobQuery::default()
        };
        assert_eq!(raw.into_filter().unwrap().company.as_deref(), Some("Acme"));

        let blank = RawJobQuery {
            company: Some("   ".to_string()),
            ..RawJobQuery::default()
        };
        assert_eq!(blank.into_filter().unwrap().company, None);
    }
}
