//! Trait abstractions shared across crates.

pub mod entity;
pub mod repository;

pub use entity::Entity;
pub use repository::TableRepository;
