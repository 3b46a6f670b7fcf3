//! HTTP error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use todo_core::errors::CoreError;
use todo_core::responses::ErrorBody;
use todo_db::error::{DatabaseError, ServiceError};
use todo_schema::SchemaError;

/// Detail reported for every request rejected before reaching the service.
pub const VALIDATION_DETAIL: &str = "Validation error";

/// Failure of a request, rendered as a JSON [`ErrorBody`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// 404.
    #[error("{0}")]
    NotFound(String),

    /// 422: the request was well-routed but its input is invalid.
    #[error("{detail}: {errors:?}")]
    Unprocessable { detail: String, errors: Vec<String> },

    /// 500: store or internal failure. The message is logged, not returned.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    #[must_use]
    pub fn invalid(errors: Vec<String>) -> Self {
        Self::Unprocessable {
            detail: VALIDATION_DETAIL.to_string(),
            errors,
        }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { entity_type, .. } => {
                Self::NotFound(format!("{entity_type} not found"))
            }
            CoreError::Validation(message) => Self::invalid(vec![message]),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Core(e) => e.into(),
            ServiceError::Database(e) => e.into(),
        }
    }
}

impl From<SchemaError> for ApiError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::ValidationFailed { errors } => Self::invalid(errors),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::NotFound(detail) => ErrorBody::new(detail),
            Self::Unprocessable { detail, errors } => ErrorBody::new(detail).with_errors(errors),
            Self::Internal(message) => {
                tracing::error!(error = %message, "request failed");
                ErrorBody::new("Internal server error")
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn not_found_detail_names_entity() {
        let err = ApiError::from(ServiceError::Core(CoreError::task_not_found("x")));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert!(matches!(err, ApiError::NotFound(ref d) if d == "Task not found"));
    }

    #[test]
    fn validation_maps_to_422() {
        let err = ApiError::from(CoreError::Validation("limit too large".into()));
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn schema_failure_keeps_individual_errors() {
        let err = ApiError::from(SchemaError::ValidationFailed {
            errors: vec!["/title: required".into(), "/x: bad".into()],
        });
        match err {
            ApiError::Unprocessable { detail, errors } => {
                assert_eq!(detail, VALIDATION_DETAIL);
                assert_eq!(errors.len(), 2);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn domain_errors_are_client_errors() {
        for err in [
            CoreError::task_not_found("x"),
            CoreError::Validation("bad".into()),
        ] {
            assert!(ApiError::from(err).status().is_client_error());
        }
    }

    #[test]
    fn store_failure_is_internal() {
        let err = ApiError::from(DatabaseError::NoResult);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
