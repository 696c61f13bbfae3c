//! Application state.

use std::sync::Arc;

use sqlx::PgPool;

use hirelink_auth::AuthConfig;
use hirelink_db::{create_pool, run_migrations};

use crate::config::ApiConfig;

/// Shared application state. Nothing here is mutable after startup;
/// per-request consistency is the database's job.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub pool: PgPool,
    pub auth: Arc<AuthConfig>,
}

impl AppState {
    /// Create new application state: auth config (fails fast when the
    /// signing secret is unset), connection pool, migrations.
    pub async fn new(config: ApiConfig) -> anyhow::Result<Self> {
        crate::error::redact_internal_errors(config.is_production());

        let auth = AuthConfig::from_env()?;
        let pool = create_pool(&config.database_url, config.db_max_connections).await?;
        run_migrations(&pool).await?;

        Ok(Self {
            config,
            pool,
            auth: Arc::new(auth),
        })
    }
}
