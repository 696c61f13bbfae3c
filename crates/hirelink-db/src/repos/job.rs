//! Job repository and the search query builder.

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use chrono::{DateTime, Utc};
use hirelink_models::{Job, JobFilter, SortOrder};

use crate::error::DbResult;

const JOB_COLUMNS: &str = "id, recruiter_id, company_id, title, description, role, department, \
     job_type, work_mode, location, skills, min_experience, max_experience, \
     ctc_type, min_ctc, max_ctc, application_deadline, created_at";

/// Same column list qualified for the search query's `jobs j` alias.
const JOB_COLUMNS_J: &str = "j.id, j.recruiter_id, j.company_id, j.title, j.description, j.role, \
     j.department, j.job_type, j.work_mode, j.location, j.skills, j.min_experience, \
     j.max_experience, j.ctc_type, j.min_ctc, j.max_ctc, j.application_deadline, j.created_at";

/// Input for creating or replacing a job posting. Validation
/// (compensation invariant, future deadline) happens at the API
/// boundary before this ever reaches the store.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub recruiter_id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub description: String,
    pub role: String,
    pub department: String,
    pub job_type: String,
    pub work_mode: String,
    pub location: String,
    pub skills: Vec<String>,
    pub min_experience: i32,
    pub max_experience: i32,
    pub ctc_type: String,
    pub min_ctc: Option<i64>,
    pub max_ctc: Option<i64>,
    pub application_deadline: DateTime<Utc>,
}

pub struct JobRepo;

impl JobRepo {
    pub async fn create(pool: &PgPool, new: &NewJob) -> DbResult<Job> {
        let job = sqlx::query_as::<_, Job>(&format!(
            "INSERT INTO jobs (recruiter_id, company_id, title, description, role, department, \
                 job_type, work_mode, location, skills, min_experience, max_experience, \
                 ctc_type, min_ctc, max_ctc, application_deadline) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
             RETURNING {JOB_COLUMNS}"
        ))
        .bind(new.recruiter_id)
        .bind(new.company_id)
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.role)
        .bind(&new.department)
        .bind(&new.job_type)
        .bind(&new.work_mode)
        .bind(&new.location)
        .bind(&new.skills)
        .bind(new.min_experience)
        .bind(new.max_experience)
        .bind(&new.ctc_type)
        .bind(new.min_ctc)
        .bind(new.max_ctc)
        .bind(new.application_deadline)
        .fetch_one(pool)
        .await?;
        Ok(job)
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> DbResult<Option<Job>> {
        let job = sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(job)
    }

    /// Replace every mutable field of a job. The caller has already
    /// fetched the row and checked ownership; PATCH semantics are
    /// implemented at the API layer by merging into the fetched job.
    pub async fn update(pool: &PgPool, id: Uuid, new: &NewJob) -> DbResult<Job> {
        let job = sqlx::query_as::<_, Job>(&format!(
            "UPDATE jobs SET company_id = $2, title = $3, description = $4, role = $5, \
                 department = $6, job_type = $7, work_mode = $8, location = $9, skills = $10, \
                 min_experience = $11, max_experience = $12, ctc_type = $13, min_ctc = $14, \
                 max_ctc = $15, application_deadline = $16 \
             WHERE id = $1 \
             RETURNING {JOB_COLUMNS}"
        ))
        .bind(id)
        .bind(new.company_id)
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.role)
        .bind(&new.department)
        .bind(&new.job_type)
        .bind(&new.work_mode)
        .bind(&new.location)
        .bind(&new.skills)
        .bind(new.min_experience)
        .bind(new.max_experience)
        .bind(&new.ctc_type)
        .bind(new.min_ctc)
        .bind(new.max_ctc)
        .bind(new.application_deadline)
        .fetch_one(pool)
        .await?;
        Ok(job)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_by_recruiter(pool: &PgPool, recruiter_id: Uuid) -> DbResult<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE recruiter_id = $1 ORDER BY created_at DESC"
        ))
        .bind(recruiter_id)
        .fetch_all(pool)
        .await?;
        Ok(jobs)
    }

    /// Run the filtered search. Returns the page of jobs plus the total
    /// match count, computed by a parallel count query from the same
    /// predicate set so pagination metadata is independent of the page.
    ///
    /// When `viewer` carries an applicant profile id, jobs that
    /// applicant already applied to or hid are excluded; anonymous and
    /// recruiter callers see the unfiltered set.
    pub async fn search(
        pool: &PgPool,
        filter: &JobFilter,
        viewer: Option<Uuid>,
    ) -> DbResult<(Vec<Job>, i64)> {
        let mut count_query = QueryBuilder::new(
            "SELECT COUNT(*) FROM jobs j JOIN companies c ON c.id = j.company_id WHERE 1=1",
        );
        push_filters(&mut count_query, filter, viewer);
        let total: i64 = count_query.build_query_scalar().fetch_one(pool).await?;

        let mut query = QueryBuilder::new(format!(
            "SELECT {JOB_COLUMNS_J} FROM jobs j JOIN companies c ON c.id = j.company_id WHERE 1=1"
        ));
        push_filters(&mut query, filter, viewer);
        query.push(match filter.sort {
            SortOrder::Newest => " ORDER BY j.created_at DESC",
            SortOrder::Oldest => " ORDER BY j.created_at ASC",
        });
        query.push(" LIMIT ");
        query.push_bind(filter.page.limit);
        query.push(" OFFSET ");
        query.push_bind(filter.page.offset());

        let jobs = query.build_query_as::<Job>().fetch_all(pool).await?;
        Ok((jobs, total))
    }
}

/// Append the filter predicates. Categories AND together; values
/// within a category OR together (membership tests, ILIKE
/// disjunctions, array overlap). Empty lists append nothing.
fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filter: &JobFilter, viewer: Option<Uuid>) {
    if !filter.roles.is_empty() {
        query.push(" AND j.role = ANY(");
        query.push_bind(filter.roles.clone());
        query.push(")");
    }

    if !filter.skills.is_empty() {
        // Non-empty intersection, not subset.
        query.push(" AND j.skills && ");
        query.push_bind(filter.skills.clone());
    }

    if !filter.job_types.is_empty() {
        let values: Vec<String> = filter
            .job_types
            .iter()
            .map(|t| t.as_str().to_string())
            .collect();
        query.push(" AND j.job_type = ANY(");
        query.push_bind(values);
        query.push(")");
    }

    if !filter.work_modes.is_empty() {
        let values: Vec<String> = filter
            .work_modes
            .iter()
            .map(|m| m.as_str().to_string())
            .collect();
        query.push(" AND j.work_mode = ANY(");
        query.push_bind(values);
        query.push(")");
    }

    if !filter.departments.is_empty() {
        query.push(" AND j.department = ANY(");
        query.push_bind(filter.departments.clone());
        query.push(")");
    }

    if !filter.company_types.is_empty() {
        query.push(" AND c.company_type = ANY(");
        query.push_bind(filter.company_types.clone());
        query.push(")");
    }

    if !filter.locations.is_empty() {
        query.push(" AND (");
        for (i, location) in filter.locations.iter().enumerate() {
            if i > 0 {
                query.push(" OR ");
            }
            query.push("j.location ILIKE ");
            query.push_bind(format!("%{location}%"));
        }
        query.push(")");
    }

    if let Some(company) = &filter.company {
        query.push(" AND c.name ILIKE ");
        query.push_bind(format!("%{company}%"));
    }

    // Band overlap, each side independently gated. Jobs without
    // published figures never match an active salary filter.
    if let Some(min) = filter.min_experience {
        query.push(" AND j.max_experience >= ");
        query.push_bind(min);
    }
    if let Some(max) = filter.max_experience {
        query.push(" AND j.min_experience <= ");
        query.push_bind(max);
    }
    if let Some(salary_min) = filter.salary_min {
        query.push(" AND j.max_ctc >= ");
        query.push_bind(salary_min);
    }
    if let Some(salary_max) = filter.salary_max {
        query.push(" AND j.min_ctc <= ");
        query.push_bind(salary_max);
    }

    if let Some(applicant_id) = viewer {
        query.push(
            " AND NOT EXISTS (SELECT 1 FROM applications a \
             WHERE a.job_id = j.id AND a.applicant_id = ",
        );
        query.push_bind(applicant_id);
        query.push(")");
        query.push(
            " AND NOT EXISTS (SELECT 1 FROM hidden_jobs h \
             WHERE h.job_id = j.id AND h.applicant_id = ",
        );
        query.push_bind(applicant_id);
        query.push(")");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hirelink_models::{JobType, PageParams, WorkMode};

    fn sql_for(filter: &JobFilter, viewer: Option<Uuid>) -> String {
        let mut query = QueryBuilder::new("SELECT 1 WHERE 1=1");
        push_filters(&mut query, filter, viewer);
        query.sql().to_string()
    }

    #[test]
    fn empty_filter_appends_nothing() {
        let sql = sql_for(&JobFilter::default(), None);
        assert_eq!(sql, "SELECT 1 WHERE 1=1");
    }

    #[test]
    fn membership_filters_use_any() {
        let filter = JobFilter {
            roles: vec!["Backend Engineer".into()],
            job_types: vec![JobType::FullTime, JobType::Contract],
            work_modes: vec![WorkMode::Remote],
            ..JobFilter::default()
        };
        let sql = sql_for(&filter, None);
        assert!(sql.contains("j.role = ANY($1)"));
        assert!(sql.contains("j.job_type = ANY($2)"));
        assert!(sql.contains("j.work_mode = ANY($3)"));
    }

    #[test]
    fn skills_use_array_overlap() {
        let filter = JobFilter {
            skills: vec!["React".into()],
            ..JobFilter::default()
        };
        assert!(sql_for(&filter, None).contains("j.skills && $1"));
    }

    #[test]
    fn locations_build_ilike_disjunction() {
        let filter = JobFilter {
            locations: vec!["Berlin".into(), "Remote".into()],
            ..JobFilter::default()
        };
        let sql = sql_for(&filter, None);
        assert!(sql.contains("(j.location ILIKE $1 OR j.location ILIKE $2)"));
    }

    #[test]
    fn experience_and_salary_are_overlap_tests() {
        let filter = JobFilter {
            min_experience: Some(3),
            max_experience: Some(5),
            salary_min: Some(50_000),
            salary_max: Some(90_000),
            ..JobFilter::default()
        };
        let sql = sql_for(&filter, None);
        assert!(sql.contains("j.max_experience >= $1"));
        assert!(sql.contains("j.min_experience <= $2"));
        assert!(sql.contains("j.max_ctc >= $3"));
        assert!(sql.contains("j.min_ctc <= $4"));
    }

    #[test]
    fn one_sided_experience_filter_activates_one_predicate() {
        let filter = JobFilter {
            min_experience: Some(3),
            ..JobFilter::default()
        };
        let sql = sql_for(&filter, None);
        assert!(sql.contains("j.max_experience >= $1"));
        assert!(!sql.contains("j.min_experience <="));
    }

    #[test]
    fn viewer_excludes_applied_and_hidden_jobs() {
        let sql = sql_for(&JobFilter::default(), Some(Uuid::new_v4()));
        assert!(sql.contains("NOT EXISTS (SELECT 1 FROM applications a"));
        assert!(sql.contains("NOT EXISTS (SELECT 1 FROM hidden_jobs h"));
    }

    #[test]
    fn anonymous_viewer_sees_unfiltered_set() {
        let sql = sql_for(&JobFilter::default(), None);
        assert!(!sql.contains("NOT EXISTS"));
    }

    #[test]
    fn page_params_do_not_leak_into_predicates() {
        let filter = JobFilter {
            page: PageParams::clamped(0, 1000),
            ..JobFilter::default()
        };
        assert_eq!(sql_for(&filter, None), "SELECT 1 WHERE 1=1");
    }
}
