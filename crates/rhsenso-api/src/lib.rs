//! # rhsenso-api
//!
//! HTTP API layer for RhSenso built on Axum.
//!
//! Every table entity gets the same six routes (list, find, by-key, create,
//! update, delete) through [`resources::ResourceRegistry`], plus login,
//! identity, catalog and health endpoints. Errors leave as the uniform
//! response envelope.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod resources;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
