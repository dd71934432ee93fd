//! Repository implementations: generic table access and account lookups.

pub mod account;
pub mod memory;
pub mod table;

pub use account::{AccountStore, MemoryAccountStore, PgAccountStore};
pub use memory::MemoryTableRepository;
pub use table::{PgTableRepository, SqlEntity};
