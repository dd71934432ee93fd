//! # rhsenso-service
//!
//! Business logic for RhSenso. [`CrudService`] implements list, find,
//! create, update and delete once for every table entity; [`AuthService`]
//! handles login.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod auth;
pub mod context;
pub mod crud;

pub use auth::{AuthService, LoginResult};
pub use context::{Identity, RequestContext};
pub use crud::CrudService;
