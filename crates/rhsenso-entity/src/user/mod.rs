//! User account entities.

pub mod model;

pub use model::{LocalUser, Principal, TenantUser};
