//! Company repository.

use sqlx::PgPool;
use uuid::Uuid;

use hirelink_models::Company;

use crate::error::DbResult;

const COMPANY_COLUMNS: &str = "id, name, company_type, website, created_by, created_at";

pub struct CompanyRepo;

impl CompanyRepo {
    pub async fn create(
        pool: &PgPool,
        name: &str,
        company_type: &str,
        website: Option<&str>,
        created_by: Uuid,
    ) -> DbResult<Company> {
        let company = sqlx::query_as::<_, Company>(
            "INSERT INTO companies (name, company_type, website, created_by) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, name, company_type, website, created_by, created_at",
        )
        .bind(name)
        .bind(company_type)
        .bind(website)
        .bind(created_by)
        .fetch_one(pool)
        .await?;
        Ok(company)
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> DbResult<Option<Company>> {
        let company = sqlx::query_as::<_, Company>(&format!(
            "SELECT {COMPANY_COLUMNS} FROM companies WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(company)
    }

    pub async fn list(pool: &PgPool) -> DbResult<Vec<Company>> {
        let companies = sqlx::query_as::<_, Company>(&format!(
            "SELECT {COMPANY_COLUMNS} FROM companies ORDER BY name"
        ))
        .fetch_all(pool)
        .await?;
        Ok(companies)
    }
}
