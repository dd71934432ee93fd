//! Resource permission entities.

pub mod action;
pub mod model;

pub use action::Action;
pub use model::PermissionGrant;
