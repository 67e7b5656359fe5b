use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::Config;

const CREATE_DEPT_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS dept (
    id BIGSERIAL PRIMARY KEY,
    name VARCHAR(10) NOT NULL UNIQUE,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
)
"#;

pub async fn create_pool(config: &Config, database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(database_url)
        .await
}

/// Creates the `dept` table if it is missing. Existing tables are left as is.
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_DEPT_TABLE).execute(pool).await?;
    Ok(())
}
