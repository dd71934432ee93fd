//! Shared types used across RhSenso crates.

pub mod filter;
pub mod pagination;
pub mod schema;
pub mod sorting;
pub mod value;

pub use filter::FilterCriteria;
pub use pagination::{PageRequest, PageResponse};
pub use schema::{Column, MatchMode, TableSchema, UniqueConstraint};
pub use sorting::{SortDirection, SortSpec};
pub use value::{ColumnKind, FieldValue};
