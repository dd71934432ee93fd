//! Jornada entity model.

use rhsenso_core::traits::Entity;
use rhsenso_core::types::{Column, ColumnKind, FieldValue, TableSchema};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

static COLUMNS: &[Column] = &[
    Column::key("cdEmpresa", "cdempresa", ColumnKind::Int),
    Column::key("cdFilial", "cdfilial", ColumnKind::Int),
    Column::key("tpJornada", "tpjornada", ColumnKind::Text).max_len(2),
    Column::key("ano", "ano", ColumnKind::Int),
    Column::key("mes", "mes", ColumnKind::Int),
    Column::field("qtHoras", "qthoras", ColumnKind::Decimal),
    Column::field("qtDiasUteis", "qtdiasuteis", ColumnKind::Int).nullable(),
];

/// Descriptor of the `jornada` table.
pub static JORNADA_SCHEMA: TableSchema = TableSchema {
    resource: "jornadas",
    table: "jornada",
    columns: COLUMNS,
    unique: &[],
};

/// Contracted hours for one company branch, schedule type and month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Jornada {
    /// Company code.
    #[sqlx(rename = "cdempresa")]
    pub cd_empresa: i32,
    /// Branch code.
    #[sqlx(rename = "cdfilial")]
    pub cd_filial: i32,
    /// Schedule type.
    #[sqlx(rename = "tpjornada")]
    pub tp_jornada: String,
    /// Reference year.
    #[validate(range(min = 1900, max = 2999))]
    pub ano: i32,
    /// Reference month (1-12).
    #[validate(range(min = 1, max = 12))]
    pub mes: i32,
    /// Contracted hours in the month.
    #[sqlx(rename = "qthoras")]
    #[validate(range(min = 0.0, max = 744.0))]
    pub qt_horas: f64,
    /// Working days in the month.
    #[sqlx(rename = "qtdiasuteis")]
    #[validate(range(min = 0, max = 31))]
    pub qt_dias_uteis: Option<i32>,
}

impl Entity for Jornada {
    fn schema() -> &'static TableSchema {
        &JORNADA_SCHEMA
    }

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Int(Some(self.cd_empresa)),
            FieldValue::Int(Some(self.cd_filial)),
            FieldValue::Text(Some(self.tp_jornada.clone())),
            FieldValue::Int(Some(self.ano)),
            FieldValue::Int(Some(self.mes)),
            FieldValue::Decimal(Some(self.qt_horas)),
            FieldValue::Int(self.qt_dias_uteis),
        ]
    }
}
