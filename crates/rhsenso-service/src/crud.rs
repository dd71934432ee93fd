//! Generic paginated CRUD over any table entity.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use rhsenso_core::config::PaginationConfig;
use rhsenso_core::error::AppError;
use rhsenso_core::query::{Key, OrderBy, Predicate};
use rhsenso_core::result::AppResult;
use rhsenso_core::traits::{Entity, TableRepository};
use rhsenso_core::types::{FieldValue, FilterCriteria, PageRequest, PageResponse, SortSpec};
use rhsenso_entity::permission::Action;

use crate::context::RequestContext;

/// List, find, create, update and delete for one table.
///
/// Every operation checks the caller's grant on the table's resource
/// before touching the store.
pub struct CrudService<E: Entity> {
    repo: Arc<dyn TableRepository<E>>,
    pagination: PaginationConfig,
}

impl<E: Entity> Clone for CrudService<E> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            pagination: self.pagination,
        }
    }
}

impl<E: Entity> std::fmt::Debug for CrudService<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrudService")
            .field("resource", &E::schema().resource)
            .field("pagination", &self.pagination)
            .finish()
    }
}

impl<E: Entity> CrudService<E> {
    /// Creates a new service over `repo`.
    pub fn new(repo: Arc<dyn TableRepository<E>>, pagination: PaginationConfig) -> Self {
        Self { repo, pagination }
    }

    fn resource() -> &'static str {
        E::schema().resource
    }

    /// One page of records matching the filter fields in `query`.
    ///
    /// `query` may also carry `page`, `pageSize`, `sortBy` and `sortDir`.
    /// Malformed paging values fall back to the defaults.
    #[instrument(skip(self, ctx, query), fields(resource = Self::resource(), actor = %ctx.subject))]
    pub async fn list(
        &self,
        ctx: &RequestContext,
        query: FilterCriteria,
    ) -> AppResult<PageResponse<E>> {
        ctx.require(Self::resource(), Action::Read)?;

        let schema = E::schema();
        let (criteria, reserved) = query.split_reserved();
        let number = |name: &str| reserved.get(name).and_then(|v| v.trim().parse::<i64>().ok());
        let page = PageRequest::from_raw(number("page"), number("pageSize"), &self.pagination);
        let sort = SortSpec::from_raw(
            reserved.get("sortBy").map(String::as_str),
            reserved.get("sortDir").map(String::as_str),
        )?;

        let predicate = Predicate::from_filter(schema, &criteria)?;
        let order = OrderBy::resolve(schema, &sort)?;

        let total = self.repo.count(&predicate).await?;
        let items = if total > page.offset() {
            self.repo.find_page(&predicate, &order, &page).await?
        } else {
            Vec::new()
        };

        debug!(total, returned = items.len(), page = page.page, "Listed records");
        Ok(PageResponse::new(items, &page, total))
    }

    /// The first record matching a (possibly partial) filter under the
    /// default key ordering.
    #[instrument(skip(self, ctx, criteria), fields(resource = Self::resource(), actor = %ctx.subject))]
    pub async fn find(&self, ctx: &RequestContext, criteria: &FilterCriteria) -> AppResult<E> {
        ctx.require(Self::resource(), Action::Read)?;

        let schema = E::schema();
        let predicate = Predicate::from_filter(schema, criteria)?;
        self.repo
            .find_first(&predicate, &OrderBy::by_key(schema))
            .await?
            .ok_or_else(|| AppError::not_found(format!("No {} record matches the filter", schema.resource)))
    }

    /// The record with the full key given in `criteria`.
    #[instrument(skip(self, ctx, criteria), fields(resource = Self::resource(), actor = %ctx.subject))]
    pub async fn get_by_key(&self, ctx: &RequestContext, criteria: &FilterCriteria) -> AppResult<E> {
        ctx.require(Self::resource(), Action::Read)?;

        let key = Key::from_criteria(E::schema(), criteria)?;
        self.load(&key).await
    }

    /// Validate and insert a new record.
    #[instrument(skip(self, ctx, entity), fields(resource = Self::resource(), actor = %ctx.subject))]
    pub async fn create(&self, ctx: &RequestContext, entity: E) -> AppResult<E> {
        ctx.require(Self::resource(), Action::Create)?;

        let schema = E::schema();
        let values = validate(&entity)?;
        let key = Key::of(schema, &values);

        if self.repo.exists(&Predicate::for_key(schema, &key)).await? {
            return Err(AppError::conflict("Record already exists"));
        }
        self.check_unique(&values, None).await?;

        let created = self.repo.insert(&entity).await?;
        info!(
            target: "rhsenso::audit",
            action = "create",
            resource = schema.resource,
            key = %key,
            actor = %ctx.subject,
            "Record created"
        );
        Ok(created)
    }

    /// Overwrite every non-key field of an existing record.
    ///
    /// The body's key identifies the record. Key fields present in
    /// `key_params` must equal the body's values: a key is never changed.
    #[instrument(skip(self, ctx, key_params, entity), fields(resource = Self::resource(), actor = %ctx.subject))]
    pub async fn update(
        &self,
        ctx: &RequestContext,
        key_params: &FilterCriteria,
        entity: E,
    ) -> AppResult<E> {
        ctx.require(Self::resource(), Action::Update)?;

        let schema = E::schema();
        let values = validate(&entity)?;
        check_key_unchanged::<E>(key_params, &values)?;
        let key = Key::of(schema, &values);

        if !self.repo.exists(&Predicate::for_key(schema, &key)).await? {
            return Err(not_found::<E>(&key));
        }
        self.check_unique(&values, Some(&key)).await?;

        let updated = self
            .repo
            .update(&entity)
            .await?
            .ok_or_else(|| not_found::<E>(&key))?;
        info!(
            target: "rhsenso::audit",
            action = "update",
            resource = schema.resource,
            key = %key,
            actor = %ctx.subject,
            "Record updated"
        );
        Ok(updated)
    }

    /// Remove the record with the full key given in `criteria`.
    #[instrument(skip(self, ctx, criteria), fields(resource = Self::resource(), actor = %ctx.subject))]
    pub async fn delete(&self, ctx: &RequestContext, criteria: &FilterCriteria) -> AppResult<()> {
        ctx.require(Self::resource(), Action::Delete)?;

        let key = Key::from_criteria(E::schema(), criteria)?;
        if !self.repo.delete(&key).await? {
            return Err(not_found::<E>(&key));
        }
        info!(
            target: "rhsenso::audit",
            action = "delete",
            resource = Self::resource(),
            key = %key,
            actor = %ctx.subject,
            "Record deleted"
        );
        Ok(())
    }

    async fn load(&self, key: &Key) -> AppResult<E> {
        let schema = E::schema();
        self.repo
            .find_first(&Predicate::for_key(schema, key), &OrderBy::by_key(schema))
            .await?
            .ok_or_else(|| not_found::<E>(key))
    }

    async fn check_unique(&self, values: &[FieldValue], own_key: Option<&Key>) -> AppResult<()> {
        let schema = E::schema();
        for constraint in schema.unique {
            let Some(mut predicate) = Predicate::for_unique(schema, constraint, values) else {
                continue;
            };
            if let Some(key) = own_key {
                predicate = predicate.excluding(schema, key);
            }
            if self.repo.exists(&predicate).await? {
                return Err(AppError::conflict(format!(
                    "Unique constraint '{}' violated",
                    constraint.name
                )));
            }
        }
        Ok(())
    }
}

/// Column and field-rule validation, merged into one error.
fn validate<E: Entity>(entity: &E) -> AppResult<Vec<FieldValue>> {
    let values = entity.values();
    let schema_result = E::schema().validate(&values);
    let rules_result = entity.validate().map_err(AppError::from);

    match (schema_result, rules_result) {
        (Ok(()), Ok(())) => Ok(values),
        (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(e),
        (Err(mut schema_err), Err(rules_err)) => {
            if !schema_err.kind.is_system() {
                schema_err.errors.extend(rules_err.errors);
            }
            Err(schema_err)
        }
    }
}

fn check_key_unchanged<E: Entity>(params: &FilterCriteria, values: &[FieldValue]) -> AppResult<()> {
    let schema = E::schema();
    let mut errors = Vec::new();
    for (field, raw) in params.iter() {
        match schema.column(field) {
            Some((idx, column)) if column.key => match FieldValue::parse(column.kind, raw) {
                Ok(value) if value.compare(&values[idx]).is_eq() => {}
                Ok(_) => errors.push(format!("{field}: does not match the record key")),
                Err(msg) => errors.push(format!("{field}: {msg}")),
            },
            Some(_) => errors.push(format!("{field}: is not a key field")),
            None => errors.push(format!("{field}: unknown field")),
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation_errors(
            "Key fields cannot be changed",
            errors,
        ))
    }
}

fn not_found<E: Entity>(key: &Key) -> AppError {
    AppError::not_found(format!("{} record {key} not found", E::schema().resource))
}
