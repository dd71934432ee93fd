//! Monthly working-hours targets (`jornada`).

pub mod model;

pub use model::{JORNADA_SCHEMA, Jornada};
