//! Filter predicates.
//!
//! A [`Predicate`] is a conjunction of column conditions built from caller
//! criteria or a record key. It performs no I/O: SQL backends render it with
//! bind parameters, the in-memory backend evaluates it with
//! [`Predicate::matches`].

use crate::error::AppError;
use crate::query::key::Key;
use crate::result::AppResult;
use crate::types::filter::FilterCriteria;
use crate::types::schema::{MatchMode, TableSchema, UniqueConstraint};
use crate::types::value::{ColumnKind, FieldValue};

/// Escape character used in rendered `LIKE` patterns.
pub const LIKE_ESCAPE: char = '\\';

/// How one column is compared.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    /// Column equals the value.
    Eq(FieldValue),
    /// Text column starts with the value.
    Prefix(String),
    /// Text column contains the value.
    Contains(String),
}

impl Comparison {
    fn matches(&self, stored: &FieldValue) -> bool {
        match self {
            // NULL never equals anything, matching SQL semantics.
            Self::Eq(expected) => !stored.is_null() && stored == expected,
            Self::Prefix(prefix) => stored.as_text().is_some_and(|s| s.starts_with(prefix.as_str())),
            Self::Contains(needle) => stored.as_text().is_some_and(|s| s.contains(needle.as_str())),
        }
    }

    /// `LIKE` pattern for prefix/contains comparisons, with wildcards escaped.
    pub fn like_pattern(&self) -> Option<String> {
        match self {
            Self::Eq(_) => None,
            Self::Prefix(prefix) => Some(format!("{}%", escape_like(prefix))),
            Self::Contains(needle) => Some(format!("%{}%", escape_like(needle))),
        }
    }
}

/// A condition on one column, addressed by its schema position.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Column index in the table schema.
    pub column: usize,
    /// Comparison applied to that column.
    pub comparison: Comparison,
}

/// Conjunction of conditions, optionally excluding one record by key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    conditions: Vec<Condition>,
    exclusion: Vec<Condition>,
}

impl Predicate {
    /// Match every row.
    pub fn all() -> Self {
        Self::default()
    }

    /// Build a partial-match predicate from caller criteria.
    ///
    /// Blank values impose nothing. Text columns use their declared match
    /// mode; every other kind uses equality. Unknown fields and values that
    /// do not parse for the column kind are rejected.
    pub fn from_filter(schema: &TableSchema, criteria: &FilterCriteria) -> AppResult<Self> {
        let mut conditions = Vec::new();
        let mut errors = Vec::new();

        for (field, raw) in criteria.iter() {
            let Some((idx, column)) = schema.column(field) else {
                errors.push(format!("{field}: unknown field"));
                continue;
            };
            let value = match FieldValue::parse(column.kind, raw) {
                Ok(value) => value,
                Err(expected) => {
                    errors.push(format!("{field}: expected {expected}"));
                    continue;
                }
            };
            let comparison = match (column.kind, column.match_mode, value) {
                (ColumnKind::Text, MatchMode::Prefix, FieldValue::Text(Some(s))) => {
                    Comparison::Prefix(s)
                }
                (ColumnKind::Text, MatchMode::Contains, FieldValue::Text(Some(s))) => {
                    Comparison::Contains(s)
                }
                (_, _, value) => Comparison::Eq(value),
            };
            conditions.push(Condition {
                column: idx,
                comparison,
            });
        }

        if errors.is_empty() {
            Ok(Self {
                conditions,
                exclusion: Vec::new(),
            })
        } else {
            Err(AppError::validation_errors(
                format!("Invalid {} filter", schema.resource),
                errors,
            ))
        }
    }

    /// Exact match on a full key.
    pub fn for_key(schema: &TableSchema, key: &Key) -> Self {
        Self {
            conditions: key_conditions(schema, key),
            exclusion: Vec::new(),
        }
    }

    /// Equality on every field of a unique constraint.
    ///
    /// Returns `None` when any of those fields is `NULL`, since a unique
    /// index never treats `NULL`s as duplicates.
    pub fn for_unique(
        schema: &TableSchema,
        constraint: &UniqueConstraint,
        values: &[FieldValue],
    ) -> Option<Self> {
        let mut conditions = Vec::with_capacity(constraint.fields.len());
        for field in constraint.fields {
            let (idx, _) = schema.column(field)?;
            let value = values.get(idx)?;
            if value.is_null() {
                return None;
            }
            conditions.push(Condition {
                column: idx,
                comparison: Comparison::Eq(value.clone()),
            });
        }
        Some(Self {
            conditions,
            exclusion: Vec::new(),
        })
    }

    /// Additionally exclude the record with `key`.
    pub fn excluding(mut self, schema: &TableSchema, key: &Key) -> Self {
        self.exclusion = key_conditions(schema, key);
        self
    }

    /// The AND-ed conditions.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Conditions identifying an excluded record; empty when none.
    pub fn exclusion(&self) -> &[Condition] {
        &self.exclusion
    }

    /// Whether the predicate constrains nothing.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.exclusion.is_empty()
    }

    /// Evaluate against a full row of values.
    pub fn matches(&self, values: &[FieldValue]) -> bool {
        let holds = |c: &Condition| values.get(c.column).is_some_and(|v| c.comparison.matches(v));
        let included = self.conditions.iter().all(holds);
        let excluded = !self.exclusion.is_empty() && self.exclusion.iter().all(holds);
        included && !excluded
    }
}

fn key_conditions(schema: &TableSchema, key: &Key) -> Vec<Condition> {
    schema
        .key_columns()
        .zip(key.values())
        .map(|((idx, _), value)| Condition {
            column: idx,
            comparison: Comparison::Eq(value.clone()),
        })
        .collect()
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}
