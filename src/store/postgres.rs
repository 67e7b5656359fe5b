use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::DepartmentStore;
use crate::errors::AppError;
use crate::models::department::Department;

#[derive(Debug, Clone)]
pub struct PgDepartmentStore {
    pool: PgPool,
}

impl PgDepartmentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DepartmentStore for PgDepartmentStore {
    async fn list(&self) -> Result<Vec<Department>, AppError> {
        let departments = sqlx::query_as::<_, Department>(
            "SELECT id, name, created_at, updated_at FROM dept ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(departments)
    }

    async fn find(&self, id: i64) -> Result<Option<Department>, AppError> {
        let department = sqlx::query_as::<_, Department>(
            "SELECT id, name, created_at, updated_at FROM dept WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(department)
    }

    async fn create(&self, name: &str, now: DateTime<Utc>) -> Result<Department, AppError> {
        let department = sqlx::query_as::<_, Department>(
            r#"
            INSERT INTO dept (name, created_at, updated_at)
            VALUES ($1, $2, $2)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(department)
    }

    async fn save(
        &self,
        id: i64,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Department>, AppError> {
        let department = sqlx::query_as::<_, Department>(
            r#"
            UPDATE dept SET name = $1, updated_at = $2
            WHERE id = $3
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(department)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM dept WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
