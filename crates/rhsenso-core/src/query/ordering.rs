//! Deterministic row ordering.

use std::cmp::Ordering;

use crate::error::AppError;
use crate::result::AppResult;
use crate::types::schema::TableSchema;
use crate::types::sorting::{SortDirection, SortSpec};
use crate::types::value::FieldValue;

/// One `ORDER BY` term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTerm {
    /// Column index in the table schema.
    pub column: usize,
    /// Direction for this column.
    pub direction: SortDirection,
}

/// A total order over rows: the requested column (if any) followed by the
/// key columns, so ties are always broken by key. `NULL`s sort first in
/// either direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    terms: Vec<OrderTerm>,
}

impl OrderBy {
    /// All key columns ascending, in declared key order.
    pub fn by_key(schema: &TableSchema) -> Self {
        Self {
            terms: schema
                .key_columns()
                .map(|(column, _)| OrderTerm {
                    column,
                    direction: SortDirection::Asc,
                })
                .collect(),
        }
    }

    /// Resolve a caller sort request against the schema.
    pub fn resolve(schema: &TableSchema, spec: &SortSpec) -> AppResult<Self> {
        let Some(field) = spec.field.as_deref() else {
            return Ok(Self::by_key(schema));
        };
        let (sorted, _) = schema.column(field).ok_or_else(|| {
            AppError::validation(format!(
                "Cannot sort {} by unknown field '{field}'",
                schema.resource
            ))
        })?;

        let mut terms = vec![OrderTerm {
            column: sorted,
            direction: spec.direction,
        }];
        terms.extend(Self::by_key(schema).terms.into_iter().filter(|t| t.column != sorted));
        Ok(Self { terms })
    }

    /// Terms in priority order.
    pub fn terms(&self) -> &[OrderTerm] {
        &self.terms
    }

    /// Compare two full rows.
    pub fn compare(&self, a: &[FieldValue], b: &[FieldValue]) -> Ordering {
        for term in &self.terms {
            let (Some(x), Some(y)) = (a.get(term.column), b.get(term.column)) else {
                continue;
            };
            let ord = match (x.is_null(), y.is_null()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                (false, false) => match term.direction {
                    SortDirection::Asc => x.compare(y),
                    SortDirection::Desc => y.compare(x),
                },
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::test_schema::{SCHEMA, row};

    #[test]
    fn default_order_is_key_ascending() {
        let order = OrderBy::by_key(&SCHEMA);
        let cols: Vec<usize> = order.terms().iter().map(|t| t.column).collect();
        assert_eq!(cols, vec![0, 1]);

        let mut rows = vec![row(2, "A", None, None), row(1, "B", None, None), row(1, "A", None, None)];
        rows.sort_by(|a, b| order.compare(a, b));
        assert_eq!(rows[0], row(1, "A", None, None));
        assert_eq!(rows[2], row(2, "A", None, None));
    }

    #[test]
    fn requested_field_then_key_tie_break() {
        let order = OrderBy::resolve(&SCHEMA, &SortSpec::desc("codigo")).unwrap();
        let cols: Vec<usize> = order.terms().iter().map(|t| t.column).collect();
        assert_eq!(cols, vec![3, 0, 1]);

        let mut rows = vec![
            row(2, "A", None, Some("X")),
            row(1, "A", None, Some("X")),
            row(3, "A", None, None),
            row(4, "A", None, Some("Y")),
        ];
        rows.sort_by(|a, b| order.compare(a, b));
        assert_eq!(rows[0], row(3, "A", None, None));
        assert_eq!(rows[1], row(4, "A", None, Some("Y")));
        assert_eq!(rows[2], row(1, "A", None, Some("X")));
        assert_eq!(rows[3], row(2, "A", None, Some("X")));
    }

    #[test]
    fn sorting_by_key_field_does_not_repeat_it() {
        let order = OrderBy::resolve(&SCHEMA, &SortSpec::desc("tpJornada")).unwrap();
        let cols: Vec<usize> = order.terms().iter().map(|t| t.column).collect();
        assert_eq!(cols, vec![1, 0]);
    }

    #[test]
    fn unknown_sort_field_is_rejected() {
        assert!(OrderBy::resolve(&SCHEMA, &SortSpec::asc("missing")).is_err());
    }
}
