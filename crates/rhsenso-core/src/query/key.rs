//! Record keys.

use std::fmt;

use crate::error::AppError;
use crate::result::AppResult;
use crate::types::filter::FilterCriteria;
use crate::types::schema::TableSchema;
use crate::types::value::FieldValue;

/// Ordered key values of one record, in declared key order.
#[derive(Debug, Clone, PartialEq)]
pub struct Key(Vec<FieldValue>);

impl Key {
    /// Extract the key from a full row of values.
    pub fn of(schema: &TableSchema, values: &[FieldValue]) -> Self {
        Self(
            schema
                .key_columns()
                .filter_map(|(idx, _)| values.get(idx).cloned())
                .collect(),
        )
    }

    /// Build a full key from query-string criteria.
    ///
    /// Every key field must be present and parse for its column kind.
    /// Fields that are not part of the key are rejected so a lookup can
    /// never silently ignore a constraint the caller thought applied.
    pub fn from_criteria(schema: &TableSchema, criteria: &FilterCriteria) -> AppResult<Self> {
        let mut errors = Vec::new();

        for (field, _) in criteria.iter() {
            match schema.column(field) {
                Some((_, column)) if column.key => {}
                Some(_) => errors.push(format!("{field}: is not a key field")),
                None => errors.push(format!("{field}: unknown field")),
            }
        }

        let mut values = Vec::new();
        let mut missing = Vec::new();
        for (_, column) in schema.key_columns() {
            match criteria.get(column.field) {
                Some(raw) => match FieldValue::parse(column.kind, raw) {
                    Ok(value) => values.push(value),
                    Err(expected) => errors.push(format!("{}: expected {expected}", column.field)),
                },
                None => missing.push(column.field),
            }
        }
        if !missing.is_empty() {
            errors.push(format!("missing key fields: {}", missing.join(", ")));
        }

        if errors.is_empty() {
            Ok(Self(values))
        } else {
            Err(AppError::validation_errors(
                format!("A complete {} key is required", schema.resource),
                errors,
            ))
        }
    }

    /// Key values in declared order.
    pub fn values(&self) -> &[FieldValue] {
        &self.0
    }

    /// `(field, value)` pairs suitable for a query string.
    pub fn query_pairs(&self, schema: &TableSchema) -> Vec<(&'static str, String)> {
        schema
            .key_columns()
            .zip(&self.0)
            .filter_map(|((_, column), value)| {
                value.to_query_value().map(|v| (column.field, v))
            })
            .collect()
    }

    /// Whether a full row carries this key.
    pub fn matches(&self, schema: &TableSchema, values: &[FieldValue]) -> bool {
        schema
            .key_columns()
            .zip(&self.0)
            .all(|((idx, _), key)| values.get(idx) == Some(key))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::test_schema::SCHEMA;

    #[test]
    fn complete_key_is_parsed_in_declared_order() {
        let criteria = FilterCriteria::new()
            .with("tpJornada", "A")
            .with("cdEmpresa", "1");
        let key = Key::from_criteria(&SCHEMA, &criteria).unwrap();
        assert_eq!(
            key.values(),
            &[FieldValue::Int(Some(1)), FieldValue::Text(Some("A".into()))]
        );
        assert_eq!(key.to_string(), "1/A");
    }

    #[test]
    fn missing_key_field_is_named() {
        let criteria = FilterCriteria::new().with("cdEmpresa", "1");
        let err = Key::from_criteria(&SCHEMA, &criteria).unwrap_err();
        assert!(err.errors.iter().any(|e| e.contains("tpJornada")));
    }

    #[test]
    fn non_key_field_is_rejected() {
        let criteria = FilterCriteria::new()
            .with("cdEmpresa", "1")
            .with("tpJornada", "A")
            .with("descricao", "x");
        let err = Key::from_criteria(&SCHEMA, &criteria).unwrap_err();
        assert_eq!(err.errors, vec!["descricao: is not a key field".to_string()]);
    }

    #[test]
    fn query_pairs_use_field_names() {
        let key = Key(vec![FieldValue::Int(Some(7)), FieldValue::Text(Some("B C".into()))]);
        assert_eq!(
            key.query_pairs(&SCHEMA),
            vec![("cdEmpresa", "7".to_string()), ("tpJornada", "B C".to_string())]
        );
    }
}
