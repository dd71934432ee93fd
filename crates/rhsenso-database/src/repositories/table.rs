//! Generic PostgreSQL repository for any schema-described entity.

use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};
use tracing::debug;

use rhsenso_core::query::{Key, OrderBy, Predicate};
use rhsenso_core::result::AppResult;
use rhsenso_core::traits::{Entity, TableRepository};
use rhsenso_core::types::{PageRequest, TableSchema};

use crate::error::map_sqlx_error;
use crate::sql::{
    count_statement, delete_statement, exists_statement, first_statement, insert_statement,
    page_statement, update_statement,
};

/// An entity that can also be decoded from a PostgreSQL row.
pub trait SqlEntity: Entity + for<'r> FromRow<'r, PgRow> + Unpin {}

impl<E> SqlEntity for E where E: Entity + for<'r> FromRow<'r, PgRow> + Unpin {}

/// Repository issuing one SQL statement per operation against the table
/// described by `E::schema()`.
#[derive(Debug)]
pub struct PgTableRepository<E> {
    pool: PgPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for PgTableRepository<E> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: SqlEntity> PgTableRepository<E> {
    /// Create a new repository over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    fn schema() -> &'static TableSchema {
        E::schema()
    }
}

#[async_trait]
impl<E: SqlEntity> TableRepository<E> for PgTableRepository<E> {
    async fn count(&self, predicate: &Predicate) -> AppResult<u64> {
        let table = Self::schema().table;
        let (sql, args) = count_statement(Self::schema(), predicate)?.finish();
        debug!(table, sql = %sql, "count");

        let total: i64 = sqlx::query_scalar_with(&sql, args)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, &format!("Failed to count {table}")))?;
        Ok(total.max(0) as u64)
    }

    async fn find_page(
        &self,
        predicate: &Predicate,
        order: &OrderBy,
        page: &PageRequest,
    ) -> AppResult<Vec<E>> {
        let table = Self::schema().table;
        let (sql, args) = page_statement(Self::schema(), predicate, order, page)?.finish();
        debug!(table, sql = %sql, page = page.page, page_size = page.page_size, "find_page");

        sqlx::query_as_with::<_, E, _>(&sql, args)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, &format!("Failed to list {table}")))
    }

    async fn find_first(&self, predicate: &Predicate, order: &OrderBy) -> AppResult<Option<E>> {
        let table = Self::schema().table;
        let (sql, args) = first_statement(Self::schema(), predicate, order)?.finish();
        debug!(table, sql = %sql, "find_first");

        sqlx::query_as_with::<_, E, _>(&sql, args)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, &format!("Failed to load {table}")))
    }

    async fn exists(&self, predicate: &Predicate) -> AppResult<bool> {
        let table = Self::schema().table;
        let (sql, args) = exists_statement(Self::schema(), predicate)?.finish();

        sqlx::query_scalar_with(&sql, args)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, &format!("Failed to check {table}")))
    }

    async fn insert(&self, entity: &E) -> AppResult<E> {
        let schema = Self::schema();
        let (sql, args) = insert_statement(schema, &entity.values())?.finish();
        debug!(table = schema.table, key = %entity.key(), "insert");

        sqlx::query_as_with::<_, E, _>(&sql, args)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, &format!("Failed to insert into {}", schema.table)))
    }

    async fn update(&self, entity: &E) -> AppResult<Option<E>> {
        let schema = Self::schema();
        let (sql, args) = update_statement(schema, &entity.values())?.finish();
        debug!(table = schema.table, key = %entity.key(), "update");

        sqlx::query_as_with::<_, E, _>(&sql, args)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, &format!("Failed to update {}", schema.table)))
    }

    async fn delete(&self, key: &Key) -> AppResult<bool> {
        let schema = Self::schema();
        let (sql, args) = delete_statement(schema, key)?.finish();
        debug!(table = schema.table, key = %key, "delete");

        let result = sqlx::query_with(&sql, args)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, &format!("Failed to delete from {}", schema.table)))?;
        Ok(result.rows_affected() > 0)
    }
}
