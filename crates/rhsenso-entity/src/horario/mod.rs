//! Work schedules (`hjor1`).

pub mod model;

pub use model::{HORARIO_SCHEMA, Horario};
