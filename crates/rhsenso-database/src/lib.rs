//! # rhsenso-database
//!
//! PostgreSQL connection management, migrations, the generic table
//! repository every CRUD resource shares, an in-memory equivalent, and the
//! account store used by authentication.

pub mod backend;
pub mod connection;
pub mod error;
pub mod migration;
pub mod repositories;
mod sql;

pub use backend::Backend;
pub use connection::DatabasePool;
pub use error::map_sqlx_error;
