//! Declarative table descriptors.
//!
//! Every legacy table is described once by a static [`TableSchema`]: which
//! JSON field maps to which column, which columns form the key, how text
//! filters match, and which unique constraints the table carries. The
//! generic query builder, repositories and HTTP routes are driven entirely
//! by this descriptor.

use serde::Serialize;

use crate::error::AppError;
use crate::types::value::{ColumnKind, FieldValue};

/// How a text filter value is compared with the stored column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Equality.
    Exact,
    /// Stored value starts with the filter value.
    Prefix,
    /// Stored value contains the filter value.
    Contains,
}

/// One column of a legacy table.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// JSON / query-string field name.
    pub field: &'static str,
    /// SQL column name.
    pub column: &'static str,
    /// Semantic type.
    pub kind: ColumnKind,
    /// Whether `NULL` is allowed.
    pub nullable: bool,
    /// Whether the column is part of the key.
    pub key: bool,
    /// Maximum length in characters for text columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_len: Option<usize>,
    /// Text filter behaviour.
    pub match_mode: MatchMode,
}

impl Column {
    /// A key column. Key columns are never nullable.
    pub const fn key(field: &'static str, column: &'static str, kind: ColumnKind) -> Self {
        Self {
            field,
            column,
            kind,
            nullable: false,
            key: true,
            max_len: None,
            match_mode: MatchMode::Exact,
        }
    }

    /// A required non-key column.
    pub const fn field(field: &'static str, column: &'static str, kind: ColumnKind) -> Self {
        Self {
            key: false,
            ..Self::key(field, column, kind)
        }
    }

    /// Allow `NULL`.
    pub const fn nullable(self) -> Self {
        Self {
            nullable: true,
            ..self
        }
    }

    /// Cap text length.
    pub const fn max_len(self, len: usize) -> Self {
        Self {
            max_len: Some(len),
            ..self
        }
    }

    /// Set the text filter behaviour.
    pub const fn matching(self, match_mode: MatchMode) -> Self {
        Self { match_mode, ..self }
    }
}

/// A unique index over a set of fields, checked before writes.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UniqueConstraint {
    /// Index name, reported in conflict messages.
    pub name: &'static str,
    /// Field names covered by the index.
    pub fields: &'static [&'static str],
}

/// Static descriptor of a legacy table exposed as a CRUD resource.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSchema {
    /// URL segment under `/api`.
    pub resource: &'static str,
    /// SQL table name.
    pub table: &'static str,
    /// Columns in entity field order. Key columns appear in key order.
    pub columns: &'static [Column],
    /// Unique constraints besides the key.
    pub unique: &'static [UniqueConstraint],
}

impl TableSchema {
    /// Look up a column by its field name.
    pub fn column(&self, field: &str) -> Option<(usize, &Column)> {
        self.columns
            .iter()
            .enumerate()
            .find(|(_, c)| c.field == field)
    }

    /// Key columns with their positions, in declared key order.
    pub fn key_columns(&self) -> impl Iterator<Item = (usize, &Column)> {
        self.columns.iter().enumerate().filter(|(_, c)| c.key)
    }

    /// Key field names in declared order.
    pub fn key_fields(&self) -> Vec<&'static str> {
        self.key_columns().map(|(_, c)| c.field).collect()
    }

    /// Check an entity's values against the column definitions.
    ///
    /// Collects every violation so the caller gets them all at once.
    pub fn validate(&self, values: &[FieldValue]) -> Result<(), AppError> {
        if values.len() != self.columns.len() {
            return Err(AppError::internal(format!(
                "Entity for '{}' produced {} values for {} columns",
                self.table,
                values.len(),
                self.columns.len()
            )));
        }

        let mut errors = Vec::new();
        for (column, value) in self.columns.iter().zip(values) {
            if value.kind() != column.kind {
                errors.push(format!("{}: expected {}", column.field, column.kind.expected()));
                continue;
            }
            if value.is_null() {
                if !column.nullable {
                    errors.push(format!("{}: is required", column.field));
                }
                continue;
            }
            if let Some(text) = value.as_text() {
                if column.key && text.trim().is_empty() {
                    errors.push(format!("{}: must not be blank", column.field));
                }
                if let Some(max) = column.max_len {
                    if text.chars().count() > max {
                        errors.push(format!("{}: must be at most {max} characters", column.field));
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation_errors(
                format!("Invalid {} record", self.resource),
                errors,
            ))
        }
    }
}
