//! Request extractors.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde_json::Value;

use todo_db::Session;
use todo_schema::SchemaRegistry;

use crate::error::ApiError;
use crate::state::AppState;

/// A database session scoped to one request.
///
/// Acquired before the handler runs and dropped when the handler returns,
/// whichever way it returns.
pub struct DbSession(pub Session);

impl FromRequestParts<AppState> for DbSession {
    type Rejection = ApiError;

    async fn from_request_parts(_parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        Ok(Self(state.service.db().session().await?))
    }
}

/// Unwrap a query string extraction, reporting failures as 422.
pub fn query<T>(extracted: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    extracted
        .map(|Query(value)| value)
        .map_err(|rejection| ApiError::invalid(vec![rejection.body_text()]))
}

/// Check a JSON body against the named schema, then deserialize it.
pub fn body<T: DeserializeOwned>(
    schemas: &SchemaRegistry,
    schema: &str,
    extracted: Result<Json<Value>, JsonRejection>,
) -> Result<T, ApiError> {
    let Json(value) = extracted.map_err(|rejection| ApiError::invalid(vec![rejection.body_text()]))?;
    schemas.validate(schema, &value)?;
    serde_json::from_value(value).map_err(|e| ApiError::invalid(vec![e.to_string()]))
}
