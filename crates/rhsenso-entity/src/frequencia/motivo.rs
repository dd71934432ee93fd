//! Occurrence reason entity (`mfre1`).

use rhsenso_core::traits::Entity;
use rhsenso_core::types::{Column, ColumnKind, FieldValue, MatchMode, TableSchema, UniqueConstraint};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

static COLUMNS: &[Column] = &[
    Column::key("tpOcorr", "tpocorr", ColumnKind::Text).max_len(2),
    Column::key("cdMotOc", "cdmotoc", ColumnKind::Text).max_len(4),
    Column::field("dcMotOc", "dcmotoc", ColumnKind::Text)
        .max_len(60)
        .matching(MatchMode::Prefix),
    Column::field("flAtivo", "flativo", ColumnKind::Bool),
];

/// Descriptor of the `mfre1` table.
pub static MOTIVO_FREQUENCIA_SCHEMA: TableSchema = TableSchema {
    resource: "motivos-frequencia",
    table: "mfre1",
    columns: COLUMNS,
    unique: &[UniqueConstraint {
        name: "ux_mfre1_tpocorr_dcmotoc",
        fields: &["tpOcorr", "dcMotOc"],
    }],
};

/// Reason attached to an attendance occurrence. Descriptions are unique
/// within an occurrence type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MotivoFrequencia {
    /// Occurrence type.
    #[sqlx(rename = "tpocorr")]
    pub tp_ocorr: String,
    /// Reason code.
    #[sqlx(rename = "cdmotoc")]
    pub cd_mot_oc: String,
    /// Description.
    #[sqlx(rename = "dcmotoc")]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub dc_mot_oc: String,
    /// Inactive reasons stay for history but are not offered for new entries.
    #[sqlx(rename = "flativo")]
    #[serde(default = "default_ativo")]
    pub fl_ativo: bool,
}

fn default_ativo() -> bool {
    true
}

impl Entity for MotivoFrequencia {
    fn schema() -> &'static TableSchema {
        &MOTIVO_FREQUENCIA_SCHEMA
    }

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Text(Some(self.tp_ocorr.clone())),
            FieldValue::Text(Some(self.cd_mot_oc.clone())),
            FieldValue::Text(Some(self.dc_mot_oc.clone())),
            FieldValue::Bool(Some(self.fl_ativo)),
        ]
    }
}
