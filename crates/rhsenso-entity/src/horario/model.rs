//! Horario entity model.

use chrono::NaiveTime;
use rhsenso_core::traits::Entity;
use rhsenso_core::types::{Column, ColumnKind, FieldValue, MatchMode, TableSchema};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

static COLUMNS: &[Column] = &[
    Column::key("cdCargHor", "cdcarghor", ColumnKind::Text).max_len(4),
    Column::field("dcCargHor", "dccarghor", ColumnKind::Text)
        .max_len(60)
        .matching(MatchMode::Contains),
    Column::field("hEntrada", "hentrada", ColumnKind::Time),
    Column::field("hSaida", "hsaida", ColumnKind::Time),
    Column::field("hIntIni", "hintini", ColumnKind::Time).nullable(),
    Column::field("hIntFim", "hintfim", ColumnKind::Time).nullable(),
    Column::field("flAtivo", "flativo", ColumnKind::Bool),
];

/// Descriptor of the `hjor1` table.
pub static HORARIO_SCHEMA: TableSchema = TableSchema {
    resource: "horarios",
    table: "hjor1",
    columns: COLUMNS,
    unique: &[],
};

/// A daily work schedule with an optional break.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_break"))]
pub struct Horario {
    /// Schedule code.
    #[sqlx(rename = "cdcarghor")]
    pub cd_carg_hor: String,
    /// Schedule description.
    #[sqlx(rename = "dccarghor")]
    pub dc_carg_hor: String,
    /// Start of the working day.
    #[sqlx(rename = "hentrada")]
    pub h_entrada: NaiveTime,
    /// End of the working day. May be earlier than `h_entrada` for night shifts.
    #[sqlx(rename = "hsaida")]
    pub h_saida: NaiveTime,
    /// Break start.
    #[sqlx(rename = "hintini")]
    pub h_int_ini: Option<NaiveTime>,
    /// Break end.
    #[sqlx(rename = "hintfim")]
    pub h_int_fim: Option<NaiveTime>,
    /// Schedules are deactivated, never removed while referenced.
    #[sqlx(rename = "flativo")]
    #[serde(default = "default_ativo")]
    pub fl_ativo: bool,
}

fn default_ativo() -> bool {
    true
}

fn validate_break(horario: &Horario) -> Result<(), ValidationError> {
    match (horario.h_int_ini, horario.h_int_fim) {
        (None, None) | (Some(_), Some(_)) => Ok(()),
        _ => Err(ValidationError::new("break")
            .with_message("hIntIni and hIntFim must be given together".into())),
    }
}

impl Entity for Horario {
    fn schema() -> &'static TableSchema {
        &HORARIO_SCHEMA
    }

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Text(Some(self.cd_carg_hor.clone())),
            FieldValue::Text(Some(self.dc_carg_hor.clone())),
            FieldValue::Time(Some(self.h_entrada)),
            FieldValue::Time(Some(self.h_saida)),
            FieldValue::Time(self.h_int_ini),
            FieldValue::Time(self.h_int_fim),
            FieldValue::Bool(Some(self.fl_ativo)),
        ]
    }
}
