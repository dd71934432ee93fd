//! # rhsenso-entity
//!
//! Entity models for RhSenso. Every table exposed through the generic CRUD
//! layer is a struct implementing [`rhsenso_core::traits::Entity`] together
//! with its static [`TableSchema`](rhsenso_core::types::TableSchema). All
//! entities derive `Debug`, `Clone`, `Serialize`, `Deserialize`, `Validate`
//! and `sqlx::FromRow`, with JSON field names in camelCase and SQL column
//! names matching the legacy tables.
//!
//! Account and permission models used by authentication live here as well,
//! but are not CRUD resources.

pub mod frequencia;
pub mod horario;
pub mod jornada;
pub mod permission;
pub mod user;

pub use frequencia::{Batida, MotivoFrequencia, OcorrenciaFrequencia};
pub use horario::Horario;
pub use jornada::Jornada;

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use rhsenso_core::traits::Entity;
    use validator::Validate;

    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn jornada() -> Jornada {
        Jornada {
            cd_empresa: 1,
            cd_filial: 1,
            tp_jornada: "A".into(),
            ano: 2024,
            mes: 3,
            qt_horas: 220.0,
            qt_dias_uteis: Some(21),
        }
    }

    /// JSON field names, value kinds and validation must agree with the schema.
    fn assert_consistent<E: Entity>(entity: &E) {
        let schema = E::schema();
        let json = serde_json::to_value(entity).unwrap();
        let object = json.as_object().unwrap();
        let mut json_fields: Vec<&str> = object.keys().map(String::as_str).collect();
        let mut schema_fields: Vec<&str> = schema.columns.iter().map(|c| c.field).collect();
        json_fields.sort_unstable();
        schema_fields.sort_unstable();
        assert_eq!(json_fields, schema_fields, "{}", schema.table);

        let values = entity.values();
        assert_eq!(values.len(), schema.columns.len());
        for (column, value) in schema.columns.iter().zip(&values) {
            assert_eq!(value.kind(), column.kind, "{}.{}", schema.table, column.field);
        }
        assert!(schema.validate(&values).is_ok());
        assert!(entity.validate().is_ok());
    }

    #[test]
    fn schemas_match_entities() {
        assert_consistent(&jornada());
        assert_consistent(&OcorrenciaFrequencia {
            no_matric: "000123".into(),
            cd_empresa: 1,
            cd_filial: 2,
            data: date(),
            h_ini: time(8, 0),
            tp_ocorr: "AT".into(),
            h_fim: Some(time(8, 30)),
            cd_mot_oc: Some("01".into()),
            qt_minutos: Some(30),
            fl_situacao: "P".into(),
            tx_obs: None,
        });
        assert_consistent(&Batida {
            no_matric: "000123".into(),
            cd_empresa: 1,
            cd_filial: 2,
            data: date(),
            hora: time(7, 58),
            tp_batida: "E".into(),
            cd_relogio: Some("REL01".into()),
            fl_importada: true,
            dt_registro: None,
        });
        assert_consistent(&Horario {
            cd_carg_hor: "H01".into(),
            dc_carg_hor: "Comercial".into(),
            h_entrada: time(8, 0),
            h_saida: time(17, 0),
            h_int_ini: Some(time(12, 0)),
            h_int_fim: Some(time(13, 0)),
            fl_ativo: true,
        });
        assert_consistent(&MotivoFrequencia {
            tp_ocorr: "AT".into(),
            cd_mot_oc: "01".into(),
            dc_mot_oc: "Atestado medico".into(),
            fl_ativo: true,
        });
    }

    #[test]
    fn key_follows_declared_order() {
        let key = jornada().key();
        assert_eq!(key.to_string(), "1/1/A/2024/3");
    }

    #[test]
    fn field_rules_are_enforced() {
        let mut invalid = jornada();
        invalid.mes = 13;
        assert!(invalid.validate().is_err());

        let horario = Horario {
            cd_carg_hor: "H02".into(),
            dc_carg_hor: "Noturno".into(),
            h_entrada: time(22, 0),
            h_saida: time(6, 0),
            h_int_ini: Some(time(2, 0)),
            h_int_fim: None,
            fl_ativo: true,
        };
        let err = rhsenso_core::AppError::from(horario.validate().unwrap_err());
        assert_eq!(
            err.errors,
            vec!["record: hIntIni and hIntFim must be given together".to_string()]
        );
    }
}
