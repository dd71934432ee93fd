//! Clock punch entity (`batidas`).

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rhsenso_core::traits::Entity;
use rhsenso_core::types::{Column, ColumnKind, FieldValue, MatchMode, TableSchema};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

static COLUMNS: &[Column] = &[
    Column::key("noMatric", "nomatric", ColumnKind::Text).max_len(8),
    Column::key("cdEmpresa", "cdempresa", ColumnKind::Int),
    Column::key("cdFilial", "cdfilial", ColumnKind::Int),
    Column::key("data", "data", ColumnKind::Date),
    Column::key("hora", "hora", ColumnKind::Time),
    Column::field("tpBatida", "tpbatida", ColumnKind::Text).max_len(1),
    Column::field("cdRelogio", "cdrelogio", ColumnKind::Text)
        .nullable()
        .max_len(10)
        .matching(MatchMode::Prefix),
    Column::field("flImportada", "flimportada", ColumnKind::Bool),
    Column::field("dtRegistro", "dtregistro", ColumnKind::DateTime).nullable(),
];

/// Descriptor of the `batidas` table.
pub static BATIDA_SCHEMA: TableSchema = TableSchema {
    resource: "batidas",
    table: "batidas",
    columns: COLUMNS,
    unique: &[],
};

/// A single clock-in or clock-out punch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Batida {
    /// Employee registration number.
    #[sqlx(rename = "nomatric")]
    pub no_matric: String,
    /// Company code.
    #[sqlx(rename = "cdempresa")]
    pub cd_empresa: i32,
    /// Branch code.
    #[sqlx(rename = "cdfilial")]
    pub cd_filial: i32,
    /// Day of the punch.
    pub data: NaiveDate,
    /// Time of the punch.
    pub hora: NaiveTime,
    /// `E` entry or `S` exit.
    #[sqlx(rename = "tpbatida")]
    #[validate(custom(function = "validate_tipo"))]
    pub tp_batida: String,
    /// Time clock identifier.
    #[sqlx(rename = "cdrelogio")]
    pub cd_relogio: Option<String>,
    /// Whether the punch came from a clock file import.
    #[sqlx(rename = "flimportada")]
    #[serde(default)]
    pub fl_importada: bool,
    /// When the punch was recorded.
    #[sqlx(rename = "dtregistro")]
    pub dt_registro: Option<NaiveDateTime>,
}

fn validate_tipo(value: &str) -> Result<(), ValidationError> {
    match value {
        "E" | "S" => Ok(()),
        _ => Err(ValidationError::new("tipo").with_message("must be E or S".into())),
    }
}

impl Entity for Batida {
    fn schema() -> &'static TableSchema {
        &BATIDA_SCHEMA
    }

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Text(Some(self.no_matric.clone())),
            FieldValue::Int(Some(self.cd_empresa)),
            FieldValue::Int(Some(self.cd_filial)),
            FieldValue::Date(Some(self.data)),
            FieldValue::Time(Some(self.hora)),
            FieldValue::Text(Some(self.tp_batida.clone())),
            FieldValue::Text(self.cd_relogio.clone()),
            FieldValue::Bool(Some(self.fl_importada)),
            FieldValue::DateTime(self.dt_registro),
        ]
    }
}
