//! User repository.

use sqlx::PgPool;
use uuid::Uuid;

use hirelink_models::{Role, User};

use crate::error::DbResult;

const USER_COLUMNS: &str = "id, name, email, password_hash, role, created_at";

/// Input for creating a user.
#[derive(Debug)]
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: Role,
}

pub struct UserRepo;

impl UserRepo {
    /// Create a user together with its role profile row in one
    /// transaction, so a crash between the two writes cannot leave a
    /// profile-less identity. A duplicate email surfaces as
    /// `DbError::UniqueViolation`.
    pub async fn create_with_profile(pool: &PgPool, new: NewUser<'_>) -> DbResult<User> {
        let mut tx = pool.begin().await?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password_hash, role) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, name, email, password_hash, role, created_at",
        )
        .bind(new.name)
        .bind(new.email)
        .bind(new.password_hash)
        .bind(new.role.as_str())
        .fetch_one(&mut *tx)
        .await?;

        match new.role {
            Role::Applicant => {
                sqlx::query("INSERT INTO applicants (user_id) VALUES ($1)")
                    .bind(user.id)
                    .execute(&mut *tx)
                    .await?;
            }
            Role::Recruiter => {
                sqlx::query("INSERT INTO recruiters (user_id) VALUES ($1)")
                    .bind(user.id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;
        Ok(user)
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(pool)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(user)
    }
}
