//! Resource catalog handler.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, ResourceInfo};

/// GET /api/resources
pub async fn list_resources(
    State(catalog): State<Arc<Vec<ResourceInfo>>>,
) -> Json<ApiResponse<Vec<ResourceInfo>>> {
    Json(ApiResponse::ok(catalog.as_ref().clone()))
}
