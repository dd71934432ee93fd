//! Time-and-attendance entities: occurrences, clock punches and
//! occurrence reasons.

pub mod batida;
pub mod motivo;
pub mod ocorrencia;

pub use batida::{BATIDA_SCHEMA, Batida};
pub use motivo::{MOTIVO_FREQUENCIA_SCHEMA, MotivoFrequencia};
pub use ocorrencia::{OCORRENCIA_FREQUENCIA_SCHEMA, OcorrenciaFrequencia};
