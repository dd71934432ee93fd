//! JSON body and query-string extractors whose rejections use the
//! response envelope.

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use rhsenso_core::error::AppError;
use rhsenso_core::types::FilterCriteria;

use crate::error::ApiError;

/// `Json<T>` that rejects malformed bodies with a 400 envelope.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::validation(format!(
                "Invalid request body: {}",
                rejection.body_text()
            ))
            .into()),
        }
    }
}

/// Query-string fields as filter criteria.
#[derive(Debug, Clone, Default)]
pub struct Criteria(pub FilterCriteria);

impl<S> FromRequestParts<S> for Criteria
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<FilterCriteria>::from_request_parts(parts, state).await {
            Ok(Query(criteria)) => Ok(Self(criteria)),
            Err(rejection) => Err(AppError::validation(format!(
                "Invalid query string: {}",
                rejection.body_text()
            ))
            .into()),
        }
    }
}
