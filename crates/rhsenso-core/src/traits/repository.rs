//! Generic repository trait for table access.

use async_trait::async_trait;

use crate::query::{Key, OrderBy, Predicate};
use crate::result::AppResult;
use crate::traits::entity::Entity;
use crate::types::pagination::PageRequest;

/// Storage operations over one entity table.
///
/// Implementations translate store failures into [`AppError`]s at this
/// boundary: duplicate keys or unique-index violations become
/// [`ErrorKind::Conflict`], connectivity problems
/// [`ErrorKind::ServiceUnavailable`], anything else [`ErrorKind::Database`].
/// Each write is a single atomic statement.
///
/// [`AppError`]: crate::AppError
/// [`ErrorKind::Conflict`]: crate::ErrorKind::Conflict
/// [`ErrorKind::ServiceUnavailable`]: crate::ErrorKind::ServiceUnavailable
/// [`ErrorKind::Database`]: crate::ErrorKind::Database
#[async_trait]
pub trait TableRepository<E: Entity>: Send + Sync + 'static {
    /// Count rows matching the predicate.
    async fn count(&self, predicate: &Predicate) -> AppResult<u64>;

    /// One page of matching rows in the given order.
    async fn find_page(
        &self,
        predicate: &Predicate,
        order: &OrderBy,
        page: &PageRequest,
    ) -> AppResult<Vec<E>>;

    /// The first matching row in the given order.
    async fn find_first(&self, predicate: &Predicate, order: &OrderBy) -> AppResult<Option<E>>;

    /// Whether any row matches.
    async fn exists(&self, predicate: &Predicate) -> AppResult<bool>;

    /// Insert a new row and return it as stored.
    async fn insert(&self, entity: &E) -> AppResult<E>;

    /// Overwrite every non-key column of the row with the entity's key.
    ///
    /// Returns `None` when no such row exists.
    async fn update(&self, entity: &E) -> AppResult<Option<E>>;

    /// Remove the row with the given key. Returns `true` if a row was removed.
    async fn delete(&self, key: &Key) -> AppResult<bool>;
}
