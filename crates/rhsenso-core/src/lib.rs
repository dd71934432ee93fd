//! # rhsenso-core
//!
//! Core crate for RhSenso. Contains configuration schemas, the unified
//! error system, pagination/sorting/filter/value types, the declarative
//! table schema, predicate and ordering builders, and the repository
//! traits every storage backend implements.
//!
//! This crate has **no** internal dependencies on other RhSenso crates.

pub mod config;
pub mod error;
pub mod query;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
