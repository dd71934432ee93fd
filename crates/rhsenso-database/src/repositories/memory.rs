//! Process-local table repository.
//!
//! Backs local runs and the HTTP test-suite with the same contract as the
//! PostgreSQL repository. All writes take one write lock, and key and
//! unique constraints are enforced inside it, so the check and the write
//! are indivisible just like a `PRIMARY KEY` / `UNIQUE` index.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use rhsenso_core::error::AppError;
use rhsenso_core::query::{Key, OrderBy, Predicate};
use rhsenso_core::result::AppResult;
use rhsenso_core::traits::{Entity, TableRepository};
use rhsenso_core::types::{FieldValue, PageRequest};

/// In-memory table for entity `E`.
#[derive(Debug)]
pub struct MemoryTableRepository<E> {
    rows: Arc<RwLock<Vec<E>>>,
}

impl<E> Clone for MemoryTableRepository<E> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
        }
    }
}

impl<E> Default for MemoryTableRepository<E> {
    fn default() -> Self {
        Self {
            rows: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl<E: Entity> MemoryTableRepository<E> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Matching rows sorted by `order`.
    async fn sorted(&self, predicate: &Predicate, order: &OrderBy) -> Vec<E> {
        let rows = self.rows.read().await;
        let mut matching: Vec<(Vec<FieldValue>, E)> = rows
            .iter()
            .map(|row| (row.values(), row))
            .filter(|(values, _)| predicate.matches(values))
            .map(|(values, row)| (values, row.clone()))
            .collect();
        matching.sort_by(|(a, _), (b, _)| order.compare(a, b));
        matching.into_iter().map(|(_, row)| row).collect()
    }
}

/// Reject `values` if another row (not `own_key`) already holds the same
/// values for a unique constraint.
fn check_unique<E: Entity>(rows: &[E], values: &[FieldValue], own_key: Option<&Key>) -> AppResult<()> {
    let schema = E::schema();
    for constraint in schema.unique {
        let Some(mut predicate) = Predicate::for_unique(schema, constraint, values) else {
            continue;
        };
        if let Some(key) = own_key {
            predicate = predicate.excluding(schema, key);
        }
        if rows.iter().any(|row| predicate.matches(&row.values())) {
            return Err(AppError::conflict(format!(
                "Unique constraint '{}' violated",
                constraint.name
            )));
        }
    }
    Ok(())
}

#[async_trait]
impl<E: Entity> TableRepository<E> for MemoryTableRepository<E> {
    async fn count(&self, predicate: &Predicate) -> AppResult<u64> {
        let rows = self.rows.read().await;
        Ok(rows.iter().filter(|row| predicate.matches(&row.values())).count() as u64)
    }

    async fn find_page(
        &self,
        predicate: &Predicate,
        order: &OrderBy,
        page: &PageRequest,
    ) -> AppResult<Vec<E>> {
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        Ok(self
            .sorted(predicate, order)
            .await
            .into_iter()
            .skip(skip)
            .take(take)
            .collect())
    }

    async fn find_first(&self, predicate: &Predicate, order: &OrderBy) -> AppResult<Option<E>> {
        Ok(self.sorted(predicate, order).await.into_iter().next())
    }

    async fn exists(&self, predicate: &Predicate) -> AppResult<bool> {
        let rows = self.rows.read().await;
        Ok(rows.iter().any(|row| predicate.matches(&row.values())))
    }

    async fn insert(&self, entity: &E) -> AppResult<E> {
        let schema = E::schema();
        let values = entity.values();
        let key = entity.key();

        let mut rows = self.rows.write().await;
        if rows.iter().any(|row| key.matches(schema, &row.values())) {
            return Err(AppError::conflict("Record already exists"));
        }
        check_unique(&rows, &values, None)?;
        rows.push(entity.clone());
        debug!(table = schema.table, key = %key, rows = rows.len(), "insert");
        Ok(entity.clone())
    }

    async fn update(&self, entity: &E) -> AppResult<Option<E>> {
        let schema = E::schema();
        let values = entity.values();
        let key = entity.key();

        let mut rows = self.rows.write().await;
        let Some(position) = rows.iter().position(|row| key.matches(schema, &row.values())) else {
            return Ok(None);
        };
        check_unique(&rows, &values, Some(&key))?;
        rows[position] = entity.clone();
        debug!(table = schema.table, key = %key, "update");
        Ok(Some(entity.clone()))
    }

    async fn delete(&self, key: &Key) -> AppResult<bool> {
        let schema = E::schema();
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| !key.matches(schema, &row.values()));
        debug!(table = schema.table, key = %key, "delete");
        Ok(rows.len() < before)
    }
}
