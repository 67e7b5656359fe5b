//! Persistence for the `dept` table.
//!
//! Handlers only see [`DepartmentStore`]; the concrete backend is picked once
//! at startup and shared as `web::Data<dyn DepartmentStore>`.

mod memory;
mod postgres;

pub use memory::InMemoryDepartmentStore;
pub use postgres::PgDepartmentStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::AppError;
use crate::models::department::Department;

#[async_trait]
pub trait DepartmentStore: Send + Sync {
    /// All departments, ordered by id.
    async fn list(&self) -> Result<Vec<Department>, AppError>;

    async fn find(&self, id: i64) -> Result<Option<Department>, AppError>;

    /// Inserts a new row stamped with `now`. Fails with `Conflict` on a duplicate name.
    async fn create(&self, name: &str, now: DateTime<Utc>) -> Result<Department, AppError>;

    /// Renames the row with the given id. Returns `None` when it does not exist.
    async fn save(
        &self,
        id: i64,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Department>, AppError>;

    /// Returns `true` if a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
