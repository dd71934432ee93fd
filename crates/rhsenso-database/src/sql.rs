//! SQL text and bind-argument assembly for schema-driven statements.

use sqlx::Arguments;
use sqlx::postgres::PgArguments;

use rhsenso_core::error::AppError;
use rhsenso_core::query::{Comparison, Condition, Key, LIKE_ESCAPE, OrderBy, Predicate};
use rhsenso_core::result::AppResult;
use rhsenso_core::types::{FieldValue, PageRequest, TableSchema};

/// Accumulates a statement and its positional (`$n`) arguments.
pub(crate) struct SqlWriter<'s> {
    schema: &'s TableSchema,
    sql: String,
    args: PgArguments,
    params: usize,
}

impl<'s> SqlWriter<'s> {
    pub(crate) fn new(schema: &'s TableSchema) -> Self {
        Self {
            schema,
            sql: String::with_capacity(128),
            args: PgArguments::default(),
            params: 0,
        }
    }

    pub(crate) fn push(&mut self, fragment: &str) -> &mut Self {
        self.sql.push_str(fragment);
        self
    }

    /// Append a placeholder and bind `value` to it.
    pub(crate) fn bind(&mut self, value: &FieldValue) -> AppResult<&mut Self> {
        let added = match value {
            FieldValue::Int(v) => self.args.add(*v),
            FieldValue::Decimal(v) => self.args.add(*v),
            FieldValue::Text(v) => self.args.add(v.clone()),
            FieldValue::Bool(v) => self.args.add(*v),
            FieldValue::Date(v) => self.args.add(*v),
            FieldValue::Time(v) => self.args.add(*v),
            FieldValue::DateTime(v) => self.args.add(*v),
        };
        added.map_err(|e| AppError::internal(format!("Failed to bind query argument: {e}")))?;
        self.bind_placeholder();
        Ok(self)
    }

    fn bind_text(&mut self, text: String) -> AppResult<&mut Self> {
        self.args
            .add(text)
            .map_err(|e| AppError::internal(format!("Failed to bind query argument: {e}")))?;
        self.bind_placeholder();
        Ok(self)
    }

    fn bind_placeholder(&mut self) {
        self.params += 1;
        self.sql.push('$');
        self.sql.push_str(&self.params.to_string());
    }

    /// Bind an integer that is not a column value (`LIMIT`, `OFFSET`).
    pub(crate) fn bind_i64(&mut self, value: i64) -> AppResult<&mut Self> {
        self.args
            .add(value)
            .map_err(|e| AppError::internal(format!("Failed to bind query argument: {e}")))?;
        self.bind_placeholder();
        Ok(self)
    }

    /// `"col1", "col2", ...` for every schema column.
    pub(crate) fn push_column_list(&mut self) -> &mut Self {
        let list = self
            .schema
            .columns
            .iter()
            .map(|c| quote(c.column))
            .collect::<Vec<_>>()
            .join(", ");
        self.push(&list)
    }

    pub(crate) fn push_table(&mut self) -> &mut Self {
        let table = quote(self.schema.table);
        self.push(&table)
    }

    /// ` WHERE ...` for a non-empty predicate; nothing otherwise.
    pub(crate) fn push_where(&mut self, predicate: &Predicate) -> AppResult<&mut Self> {
        if predicate.is_empty() {
            return Ok(self);
        }
        self.push(" WHERE ");
        let mut first = true;
        for condition in predicate.conditions() {
            if !first {
                self.push(" AND ");
            }
            first = false;
            self.push_condition(condition)?;
        }
        if !predicate.exclusion().is_empty() {
            if !first {
                self.push(" AND ");
            }
            self.push("NOT (");
            for (i, condition) in predicate.exclusion().iter().enumerate() {
                if i > 0 {
                    self.push(" AND ");
                }
                self.push_condition(condition)?;
            }
            self.push(")");
        }
        Ok(self)
    }

    fn push_condition(&mut self, condition: &Condition) -> AppResult<()> {
        let column = self.column_name(condition.column)?;
        self.push(&column);
        match &condition.comparison {
            Comparison::Eq(value) => {
                self.push(" = ");
                self.bind(value)?;
            }
            comparison => {
                let pattern = comparison.like_pattern().unwrap_or_default();
                self.push(" LIKE ");
                self.bind_text(pattern)?;
                self.push(&format!(" ESCAPE '{LIKE_ESCAPE}'"));
            }
        }
        Ok(())
    }

    /// ` ORDER BY ...` with `NULLS FIRST` on every term.
    pub(crate) fn push_order_by(&mut self, order: &OrderBy) -> AppResult<&mut Self> {
        let mut terms = Vec::with_capacity(order.terms().len());
        for term in order.terms() {
            terms.push(format!(
                "{} {} NULLS FIRST",
                self.column_name(term.column)?,
                term.direction.as_sql()
            ));
        }
        if !terms.is_empty() {
            self.push(" ORDER BY ");
            self.push(&terms.join(", "));
        }
        Ok(self)
    }

    fn column_name(&self, index: usize) -> AppResult<String> {
        self.schema
            .columns
            .get(index)
            .map(|c| quote(c.column))
            .ok_or_else(|| {
                AppError::internal(format!(
                    "Column index {index} out of range for table '{}'",
                    self.schema.table
                ))
            })
    }

    pub(crate) fn finish(self) -> (String, PgArguments) {
        (self.sql, self.args)
    }

    #[cfg(test)]
    pub(crate) fn sql(&self) -> &str {
        &self.sql
    }
}

fn quote(ident: &str) -> String {
    format!("\"{ident}\"")
}

/// `SELECT COUNT(*)` over the rows matching `predicate`.
pub(crate) fn count_statement<'s>(
    schema: &'s TableSchema,
    predicate: &Predicate,
) -> AppResult<SqlWriter<'s>> {
    let mut w = SqlWriter::new(schema);
    w.push("SELECT COUNT(*) FROM ").push_table();
    w.push_where(predicate)?;
    Ok(w)
}

fn select_statement<'s>(
    schema: &'s TableSchema,
    predicate: &Predicate,
    order: &OrderBy,
) -> AppResult<SqlWriter<'s>> {
    let mut w = SqlWriter::new(schema);
    w.push("SELECT ").push_column_list().push(" FROM ").push_table();
    w.push_where(predicate)?;
    w.push_order_by(order)?;
    Ok(w)
}

/// Ordered `SELECT` of one page window.
pub(crate) fn page_statement<'s>(
    schema: &'s TableSchema,
    predicate: &Predicate,
    order: &OrderBy,
    page: &PageRequest,
) -> AppResult<SqlWriter<'s>> {
    let mut w = select_statement(schema, predicate, order)?;
    w.push(" LIMIT ");
    w.bind_i64(i64::try_from(page.limit()).unwrap_or(i64::MAX))?;
    w.push(" OFFSET ");
    w.bind_i64(i64::try_from(page.offset()).unwrap_or(i64::MAX))?;
    Ok(w)
}

/// Ordered `SELECT` of the first matching row.
pub(crate) fn first_statement<'s>(
    schema: &'s TableSchema,
    predicate: &Predicate,
    order: &OrderBy,
) -> AppResult<SqlWriter<'s>> {
    let mut w = select_statement(schema, predicate, order)?;
    w.push(" LIMIT 1");
    Ok(w)
}

pub(crate) fn exists_statement<'s>(
    schema: &'s TableSchema,
    predicate: &Predicate,
) -> AppResult<SqlWriter<'s>> {
    let mut w = SqlWriter::new(schema);
    w.push("SELECT EXISTS (SELECT 1 FROM ").push_table();
    w.push_where(predicate)?;
    w.push(")");
    Ok(w)
}

/// `INSERT ... RETURNING` of every column.
pub(crate) fn insert_statement<'s>(
    schema: &'s TableSchema,
    values: &[FieldValue],
) -> AppResult<SqlWriter<'s>> {
    let mut w = SqlWriter::new(schema);
    w.push("INSERT INTO ").push_table().push(" (").push_column_list().push(") VALUES (");
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            w.push(", ");
        }
        w.bind(value)?;
    }
    w.push(") RETURNING ").push_column_list();
    Ok(w)
}

/// `UPDATE` overwriting every non-key column of the row identified by the
/// key carried in `values`.
pub(crate) fn update_statement<'s>(
    schema: &'s TableSchema,
    values: &[FieldValue],
) -> AppResult<SqlWriter<'s>> {
    let mut w = SqlWriter::new(schema);
    w.push("UPDATE ").push_table().push(" SET ");

    let mut assigned = 0;
    for (column, value) in schema.columns.iter().zip(values) {
        if column.key {
            continue;
        }
        if assigned > 0 {
            w.push(", ");
        }
        w.push(&format!("{} = ", quote(column.column)));
        w.bind(value)?;
        assigned += 1;
    }
    if assigned == 0 {
        // Key-only table: nothing to overwrite, but still report existence.
        if let Some((_, first)) = schema.key_columns().next() {
            let column = quote(first.column);
            w.push(&format!("{column} = {column}"));
        }
    }

    let key = Key::of(schema, values);
    w.push_where(&Predicate::for_key(schema, &key))?;
    w.push(" RETURNING ").push_column_list();
    Ok(w)
}

pub(crate) fn delete_statement<'s>(
    schema: &'s TableSchema,
    key: &Key,
) -> AppResult<SqlWriter<'s>> {
    let mut w = SqlWriter::new(schema);
    w.push("DELETE FROM ").push_table();
    w.push_where(&Predicate::for_key(schema, key))?;
    Ok(w)
}

#[cfg(test)]
mod tests {
    use rhsenso_core::traits::Entity;
    use rhsenso_core::types::{Column, ColumnKind, FilterCriteria, SortSpec};
    use rhsenso_entity::frequencia::OCORRENCIA_FREQUENCIA_SCHEMA;
    use rhsenso_entity::jornada::{JORNADA_SCHEMA, Jornada};

    use super::*;

    const JORNADA_COLUMNS: &str = "\"cdempresa\", \"cdfilial\", \"tpjornada\", \"ano\", \"mes\", \
                                   \"qthoras\", \"qtdiasuteis\"";
    const JORNADA_KEY_WHERE: &str = " WHERE \"cdempresa\" = $3 AND \"cdfilial\" = $4 \
                                     AND \"tpjornada\" = $5 AND \"ano\" = $6 AND \"mes\" = $7";

    static TIPO_COLUMNS: &[Column] = &[
        Column::key("cdEmpresa", "cdempresa", ColumnKind::Int),
        Column::key("tpJornada", "tpjornada", ColumnKind::Text),
    ];

    static TIPO_SCHEMA: TableSchema = TableSchema {
        resource: "tipos-jornada",
        table: "tjor1",
        columns: TIPO_COLUMNS,
        unique: &[],
    };

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

    fn jornada_key() -> Key {
        jornada().key()
    }

    #[test]
    fn renders_filter_with_placeholders() {
        let criteria = FilterCriteria::new().with("cdEmpresa", "1").with("ano", "2024");
        let predicate = Predicate::from_filter(&JORNADA_SCHEMA, &criteria).unwrap();
        let mut w = SqlWriter::new(&JORNADA_SCHEMA);
        w.push("SELECT COUNT(*) FROM ").push_table();
        w.push_where(&predicate).unwrap();
        assert_eq!(
            w.sql(),
            "SELECT COUNT(*) FROM \"jornada\" WHERE \"ano\" = $1 AND \"cdempresa\" = $2"
        );
    }

    #[test]
    fn renders_contains_as_escaped_like() {
        let criteria = FilterCriteria::new().with("txObs", "50%");
        let predicate = Predicate::from_filter(&OCORRENCIA_FREQUENCIA_SCHEMA, &criteria).unwrap();
        let mut w = SqlWriter::new(&OCORRENCIA_FREQUENCIA_SCHEMA);
        w.push_where(&predicate).unwrap();
        assert_eq!(w.sql(), " WHERE \"txobs\" LIKE $1 ESCAPE '\\'");
    }

    #[test]
    fn renders_exclusion_and_order() {
        let criteria = FilterCriteria::new()
            .with("cdEmpresa", "1")
            .with("cdFilial", "1")
            .with("tpJornada", "A")
            .with("ano", "2024")
            .with("mes", "3");
        let key = Key::from_criteria(&JORNADA_SCHEMA, &criteria).unwrap();
        let predicate = Predicate::all().excluding(&JORNADA_SCHEMA, &key);
        let order = OrderBy::resolve(&JORNADA_SCHEMA, &SortSpec::desc("qtHoras")).unwrap();

        let mut w = SqlWriter::new(&JORNADA_SCHEMA);
        w.push_where(&predicate).unwrap();
        w.push_order_by(&order).unwrap();
        assert_eq!(
            w.sql(),
            " WHERE NOT (\"cdempresa\" = $1 AND \"cdfilial\" = $2 AND \"tpjornada\" = $3 \
             AND \"ano\" = $4 AND \"mes\" = $5) ORDER BY \"qthoras\" DESC NULLS FIRST, \
             \"cdempresa\" ASC NULLS FIRST, \"cdfilial\" ASC NULLS FIRST, \
             \"tpjornada\" ASC NULLS FIRST, \"ano\" ASC NULLS FIRST, \"mes\" ASC NULLS FIRST"
        );
    }

    #[test]
    fn insert_binds_every_column_and_returns_the_row() {
        let (sql, args) = insert_statement(&JORNADA_SCHEMA, &jornada().values())
            .unwrap()
            .finish();
        assert_eq!(
            sql,
            format!(
                "INSERT INTO \"jornada\" ({JORNADA_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7) \
                 RETURNING {JORNADA_COLUMNS}"
            )
        );
        assert_eq!(args.len(), 7);
    }

    #[test]
    fn update_sets_non_key_columns_and_filters_by_key() {
        let (sql, args) = update_statement(&JORNADA_SCHEMA, &jornada().values())
            .unwrap()
            .finish();
        assert_eq!(
            sql,
            format!(
                "UPDATE \"jornada\" SET \"qthoras\" = $1, \"qtdiasuteis\" = $2\
                 {JORNADA_KEY_WHERE} RETURNING {JORNADA_COLUMNS}"
            )
        );
        assert_eq!(args.len(), 7);
    }

    #[test]
    fn update_of_key_only_table_assigns_first_key_to_itself() {
        let values = [
            FieldValue::Int(Some(1)),
            FieldValue::Text(Some("A".to_string())),
        ];
        let w = update_statement(&TIPO_SCHEMA, &values).unwrap();
        assert_eq!(
            w.sql(),
            "UPDATE \"tjor1\" SET \"cdempresa\" = \"cdempresa\" \
             WHERE \"cdempresa\" = $1 AND \"tpjornada\" = $2 \
             RETURNING \"cdempresa\", \"tpjornada\""
        );
    }

    #[test]
    fn page_window_placeholders_follow_filter_placeholders() {
        let criteria = FilterCriteria::new().with("cdEmpresa", "1");
        let predicate = Predicate::from_filter(&JORNADA_SCHEMA, &criteria).unwrap();
        let order = OrderBy::by_key(&JORNADA_SCHEMA);
        let page = PageRequest {
            page: 3,
            page_size: 10,
        };

        let (sql, args) = page_statement(&JORNADA_SCHEMA, &predicate, &order, &page)
            .unwrap()
            .finish();
        assert_eq!(
            sql,
            format!(
                "SELECT {JORNADA_COLUMNS} FROM \"jornada\" WHERE \"cdempresa\" = $1 \
                 ORDER BY \"cdempresa\" ASC NULLS FIRST, \"cdfilial\" ASC NULLS FIRST, \
                 \"tpjornada\" ASC NULLS FIRST, \"ano\" ASC NULLS FIRST, \"mes\" ASC NULLS FIRST \
                 LIMIT $2 OFFSET $3"
            )
        );
        assert_eq!(args.len(), 3);
    }

    #[test]
    fn first_match_takes_one_row() {
        let order = OrderBy::by_key(&JORNADA_SCHEMA);
        let w = first_statement(&JORNADA_SCHEMA, &Predicate::all(), &order).unwrap();
        assert!(w.sql().starts_with("SELECT "));
        assert!(w.sql().ends_with("\"mes\" ASC NULLS FIRST LIMIT 1"), "{}", w.sql());
    }

    #[test]
    fn exists_count_and_delete_filter_by_key() {
        let predicate = Predicate::for_key(&JORNADA_SCHEMA, &jornada_key());
        let key_where = " WHERE \"cdempresa\" = $1 AND \"cdfilial\" = $2 \
                         AND \"tpjornada\" = $3 AND \"ano\" = $4 AND \"mes\" = $5";

        let w = exists_statement(&JORNADA_SCHEMA, &predicate).unwrap();
        assert_eq!(w.sql(), format!("SELECT EXISTS (SELECT 1 FROM \"jornada\"{key_where})"));

        let w = count_statement(&JORNADA_SCHEMA, &predicate).unwrap();
        assert_eq!(w.sql(), format!("SELECT COUNT(*) FROM \"jornada\"{key_where}"));

        let (sql, args) = delete_statement(&JORNADA_SCHEMA, &jornada_key()).unwrap().finish();
        assert_eq!(sql, format!("DELETE FROM \"jornada\"{key_where}"));
        assert_eq!(args.len(), 5);
    }

    #[test]
    fn count_without_filter_has_no_where() {
        let w = count_statement(&JORNADA_SCHEMA, &Predicate::all()).unwrap();
        assert_eq!(w.sql(), "SELECT COUNT(*) FROM \"jornada\"");
    }
}
