//! Attendance occurrence entity (`freq1`).

use chrono::{NaiveDate, NaiveTime};
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
    Column::key("hIni", "hini", ColumnKind::Time),
    Column::key("tpOcorr", "tpocorr", ColumnKind::Text).max_len(2),
    Column::field("hFim", "hfim", ColumnKind::Time).nullable(),
    Column::field("cdMotOc", "cdmotoc", ColumnKind::Text)
        .nullable()
        .max_len(4),
    Column::field("qtMinutos", "qtminutos", ColumnKind::Int).nullable(),
    Column::field("flSituacao", "flsituacao", ColumnKind::Text).max_len(1),
    Column::field("txObs", "txobs", ColumnKind::Text)
        .nullable()
        .max_len(255)
        .matching(MatchMode::Contains),
];

/// Descriptor of the `freq1` table.
pub static OCORRENCIA_FREQUENCIA_SCHEMA: TableSchema = TableSchema {
    resource: "ocorrencias-frequencia",
    table: "freq1",
    columns: COLUMNS,
    unique: &[],
};

/// An absence, delay or overtime occurrence on an employee's day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_interval"))]
pub struct OcorrenciaFrequencia {
    /// Employee registration number.
    #[sqlx(rename = "nomatric")]
    pub no_matric: String,
    /// Company code.
    #[sqlx(rename = "cdempresa")]
    pub cd_empresa: i32,
    /// Branch code.
    #[sqlx(rename = "cdfilial")]
    pub cd_filial: i32,
    /// Day of the occurrence.
    pub data: NaiveDate,
    /// Start time.
    #[sqlx(rename = "hini")]
    pub h_ini: NaiveTime,
    /// Occurrence type.
    #[sqlx(rename = "tpocorr")]
    pub tp_ocorr: String,
    /// End time.
    #[sqlx(rename = "hfim")]
    pub h_fim: Option<NaiveTime>,
    /// Reason code, see `mfre1`.
    #[sqlx(rename = "cdmotoc")]
    pub cd_mot_oc: Option<String>,
    /// Duration in minutes.
    #[sqlx(rename = "qtminutos")]
    #[validate(range(min = 0, max = 1440))]
    pub qt_minutos: Option<i32>,
    /// Situation flag: `P` pending, `A` approved, `R` rejected.
    #[sqlx(rename = "flsituacao")]
    #[validate(custom(function = "validate_situacao"))]
    pub fl_situacao: String,
    /// Free-text remark.
    #[sqlx(rename = "txobs")]
    pub tx_obs: Option<String>,
}

fn validate_situacao(value: &str) -> Result<(), ValidationError> {
    match value {
        "P" | "A" | "R" => Ok(()),
        _ => Err(ValidationError::new("situacao").with_message("must be P, A or R".into())),
    }
}

fn validate_interval(record: &OcorrenciaFrequencia) -> Result<(), ValidationError> {
    match record.h_fim {
        Some(fim) if fim < record.h_ini => Err(ValidationError::new("interval")
            .with_message("hFim must not be earlier than hIni".into())),
        _ => Ok(()),
    }
}

impl Entity for OcorrenciaFrequencia {
    fn schema() -> &'static TableSchema {
        &OCORRENCIA_FREQUENCIA_SCHEMA
    }

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Text(Some(self.no_matric.clone())),
            FieldValue::Int(Some(self.cd_empresa)),
            FieldValue::Int(Some(self.cd_filial)),
            FieldValue::Date(Some(self.data)),
            FieldValue::Time(Some(self.h_ini)),
            FieldValue::Text(Some(self.tp_ocorr.clone())),
            FieldValue::Time(self.h_fim),
            FieldValue::Text(self.cd_mot_oc.clone()),
            FieldValue::Int(self.qt_minutos),
            FieldValue::Text(Some(self.fl_situacao.clone())),
            FieldValue::Text(self.tx_obs.clone()),
        ]
    }
}
