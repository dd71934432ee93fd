//! The entity abstraction every exposed table implements.

use serde::Serialize;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::query::Key;
use crate::types::schema::TableSchema;
use crate::types::value::FieldValue;

/// A record of a legacy table described by a static [`TableSchema`].
///
/// `values` must yield one value per schema column, in column order. The
/// generic query, repository and HTTP layers rely on that alignment instead
/// of runtime reflection. Field rules the schema cannot express (ranges,
/// formats) come from the [`Validate`] derive.
pub trait Entity: Clone + Send + Sync + Serialize + DeserializeOwned + Validate + 'static {
    /// The table descriptor.
    fn schema() -> &'static TableSchema;

    /// Column values in schema order.
    fn values(&self) -> Vec<FieldValue>;

    /// The record key.
    fn key(&self) -> Key {
        Key::of(Self::schema(), &self.values())
    }
}
