use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::DepartmentStore;
use crate::errors::AppError;
use crate::models::department::Department;

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, Department>,
    last_id: i64,
}

impl Table {
    fn name_taken(&self, name: &str, except: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|d| d.name == name && Some(d.id) != except)
    }
}

/// In-process stand-in for the `dept` table.
///
/// Ids are never reused, like a `BIGSERIAL` sequence.
#[derive(Debug, Default)]
pub struct InMemoryDepartmentStore {
    table: RwLock<Table>,
}

impl InMemoryDepartmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> AppError {
    AppError::InternalServerError("department table lock poisoned".to_string())
}

fn duplicate_name() -> AppError {
    AppError::Conflict("Department name already exists".to_string())
}

#[async_trait]
impl DepartmentStore for InMemoryDepartmentStore {
    async fn list(&self) -> Result<Vec<Department>, AppError> {
        let table = self.table.read().map_err(|_| poisoned())?;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find(&self, id: i64) -> Result<Option<Department>, AppError> {
        let table = self.table.read().map_err(|_| poisoned())?;
        Ok(table.rows.get(&id).cloned())
    }

    async fn create(&self, name: &str, now: DateTime<Utc>) -> Result<Department, AppError> {
        let mut table = self.table.write().map_err(|_| poisoned())?;
        if table.name_taken(name, None) {
            return Err(duplicate_name());
        }

        table.last_id += 1;
        let department = Department {
            id: table.last_id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(department.id, department.clone());
        Ok(department)
    }

    async fn save(
        &self,
        id: i64,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Department>, AppError> {
        let mut table = self.table.write().map_err(|_| poisoned())?;
        if !table.rows.contains_key(&id) {
            return Ok(None);
        }
        if table.name_taken(name, Some(id)) {
            return Err(duplicate_name());
        }

        let department = table.rows.get_mut(&id).map(|d| {
            d.name = name.to_string();
            d.updated_at = now;
            d.clone()
        });
        Ok(department)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut table = self.table.write().map_err(|_| poisoned())?;
        Ok(table.rows.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn ids_are_assigned_in_order_and_not_reused() {
        let store = InMemoryDepartmentStore::new();
        let now = Utc::now();

        let a = store.create("eng", now).await.unwrap();
        let b = store.create("ops", now).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));

        assert!(store.delete(b.id).await.unwrap());
        let c = store.create("hr", now).await.unwrap();
        assert_eq!(c.id, 3);

        let names: Vec<_> = store.list().await.unwrap().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["eng", "hr"]);
    }

    #[tokio::test]
    async fn duplicate_names_are_rejected() {
        let store = InMemoryDepartmentStore::new();
        let now = Utc::now();
        store.create("eng", now).await.unwrap();
        let ops = store.create("ops", now).await.unwrap();

        assert_eq!(store.create("eng", now).await.unwrap_err(), duplicate_name());
        assert_eq!(store.save(ops.id, "eng", now).await.unwrap_err(), duplicate_name());
        // Renaming a row to its own name is not a conflict.
        assert!(store.save(ops.id, "ops", now).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn save_touches_only_the_target_row() {
        let store = InMemoryDepartmentStore::new();
        let created = Utc::now();
        let eng = store.create("eng", created).await.unwrap();
        let ops = store.create("ops", created).await.unwrap();

        let later = created + Duration::seconds(5);
        let saved = store.save(eng.id, "platform", later).await.unwrap().unwrap();
        assert_eq!(saved.name, "platform");
        assert_eq!(saved.created_at, created);
        assert_eq!(saved.updated_at, later);

        assert_eq!(store.find(ops.id).await.unwrap(), Some(ops));
        assert!(store.save(99, "ghost", later).await.unwrap().is_none());
        assert!(!store.delete(99).await.unwrap());
    }
}
