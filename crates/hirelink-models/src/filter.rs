//! Typed job search filter.
//!
//! The HTTP layer parses the loose query string once at the boundary
//! into this struct; the database layer only ever sees validated,
//! typed values.

use serde::{Deserialize, Serialize};

use crate::job::{JobType, WorkMode};

/// Default page size for job listings.
pub const DEFAULT_LIMIT: i64 = 25;
/// Hard cap on page size regardless of what the client asks for.
pub const MAX_LIMIT: i64 = 100;

/// Sort direction over job creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

/// Clamped pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: i64,
    pub limit: i64,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageParams {
    /// Build from raw values, clamping page to >= 1 and limit to
    /// [1, MAX_LIMIT].
    pub fn clamped(page: i64, limit: i64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    /// Row offset for the current page.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

/// Validated search filter. Every field is optional; `None` or an
/// empty list means "no filter", never "match nothing".
///
/// Categories compose with AND; values within a category compose with
/// OR. Experience and salary are range-overlap tests, either side of
/// which may be active independently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilter {
    pub roles: Vec<String>,
    pub skills: Vec<String>,
    pub job_types: Vec<JobType>,
    pub locations: Vec<String>,
    pub work_modes: Vec<WorkMode>,
    pub departments: Vec<String>,
    pub company_types: Vec<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub min_experience: Option<i32>,
    pub max_experience: Option<i32>,
    /// Case-insensitive substring of the company name.
    pub company: Option<String>,
    pub sort: SortOrder,
    pub page: PageParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_is_floored_at_one() {
        assert_eq!(PageParams::clamped(0, 25).page, 1);
        assert_eq!(PageParams::clamped(-3, 25).page, 1);
        assert_eq!(PageParams::clamped(7, 25).page, 7);
    }

    #[test]
    fn limit_is_clamped_to_range() {
        assert_eq!(PageParams::clamped(1, 1000).limit, MAX_LIMIT);
        assert_eq!(PageParams::clamped(1, 0).limit, 1);
        assert_eq!(PageParams::clamped(1, 50).limit, 50);
    }

    #[test]
    fn offset_follows_page_and_limit() {
        assert_eq!(PageParams::clamped(1, 25).offset(), 0);
        assert_eq!(PageParams::clamped(3, 10).offset(), 20);
    }
}
