//! Generic resource handlers, instantiated once per entity.

use std::sync::Arc;

use axum::Json;
use axum::extract::{FromRef, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use rhsenso_auth::JwtDecoder;
use rhsenso_core::error::AppError;
use rhsenso_core::query::Key;
use rhsenso_core::traits::Entity;
use rhsenso_core::types::PageResponse;
use rhsenso_service::CrudService;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, Criteria, JsonBody};

/// Characters left unescaped in query values: RFC 3986 unreserved.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// State of one resource's routes.
pub struct ResourceState<E: Entity> {
    /// The entity's CRUD service.
    pub service: CrudService<E>,
    /// Token validation for [`AuthUser`].
    pub jwt_decoder: Arc<JwtDecoder>,
}

impl<E: Entity> Clone for ResourceState<E> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            jwt_decoder: Arc::clone(&self.jwt_decoder),
        }
    }
}

impl<E: Entity> FromRef<ResourceState<E>> for Arc<JwtDecoder> {
    fn from_ref(state: &ResourceState<E>) -> Self {
        Arc::clone(&state.jwt_decoder)
    }
}

/// `by-key` URL of a record.
pub fn locator<E: Entity>(key: &Key) -> String {
    let schema = E::schema();
    let query = key
        .query_pairs(schema)
        .into_iter()
        .map(|(field, value)| format!("{field}={}", utf8_percent_encode(&value, QUERY_VALUE)))
        .collect::<Vec<_>>()
        .join("&");
    format!("/api/{}/by-key?{query}", schema.resource)
}

/// GET /api/{resource}
pub async fn list<E: Entity>(
    State(state): State<ResourceState<E>>,
    auth: AuthUser,
    Criteria(query): Criteria,
) -> Result<Json<ApiResponse<PageResponse<E>>>, ApiError> {
    let page = state.service.list(auth.context(), query).await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/{resource}/find
pub async fn find<E: Entity>(
    State(state): State<ResourceState<E>>,
    auth: AuthUser,
    Criteria(criteria): Criteria,
) -> Result<Json<ApiResponse<E>>, ApiError> {
    let entity = state.service.find(auth.context(), &criteria).await?;
    Ok(Json(ApiResponse::ok(entity)))
}

/// GET /api/{resource}/by-key
pub async fn by_key<E: Entity>(
    State(state): State<ResourceState<E>>,
    auth: AuthUser,
    Criteria(criteria): Criteria,
) -> Result<Json<ApiResponse<E>>, ApiError> {
    let entity = state.service.get_by_key(auth.context(), &criteria).await?;
    Ok(Json(ApiResponse::ok(entity)))
}

/// POST /api/{resource}
pub async fn create<E: Entity>(
    State(state): State<ResourceState<E>>,
    auth: AuthUser,
    JsonBody(entity): JsonBody<E>,
) -> Result<Response, ApiError> {
    let created = state.service.create(auth.context(), entity).await?;
    let location = HeaderValue::from_str(&locator::<E>(&created.key()))
        .map_err(|e| AppError::internal(format!("Invalid Location header: {e}")))?;

    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(ApiResponse::ok_with_message(created, "Record created")),
    )
        .into_response())
}

/// PUT /api/{resource}
pub async fn update<E: Entity>(
    State(state): State<ResourceState<E>>,
    auth: AuthUser,
    Criteria(key_params): Criteria,
    JsonBody(entity): JsonBody<E>,
) -> Result<Json<ApiResponse<E>>, ApiError> {
    let updated = state
        .service
        .update(auth.context(), &key_params, entity)
        .await?;
    Ok(Json(ApiResponse::ok_with_message(updated, "Record updated")))
}

/// DELETE /api/{resource}
pub async fn delete<E: Entity>(
    State(state): State<ResourceState<E>>,
    auth: AuthUser,
    Criteria(criteria): Criteria,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.service.delete(auth.context(), &criteria).await?;
    Ok(Json(ApiResponse::message("Record deleted")))
}
