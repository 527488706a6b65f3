//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::{RepositoryError, ValidationError};
use services::{FailureReason, ServiceError};

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// A request field failed value object validation.
    Validation(ValidationError),
    /// Application service error.
    Service(ServiceError),
    /// Storage error outside a service call.
    Repository(RepositoryError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::Service(err) => service_error_to_response(err),
            ApiError::Repository(err) => {
                tracing::error!(error = %err, "repository failure");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        metrics::counter!("zoo_api_errors_total", "status" => status.as_u16().to_string())
            .increment(1);

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn service_error_to_response(err: ServiceError) -> (StatusCode, String) {
    let status = match err.reason() {
        FailureReason::NotFound => StatusCode::NOT_FOUND,
        FailureReason::RuleViolation => StatusCode::BAD_REQUEST,
        FailureReason::Conflict => StatusCode::CONFLICT,
        FailureReason::Unexpected => {
            tracing::error!(error = %err, "internal server error");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, err.to_string())
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::Service(err)
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        ApiError::Repository(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{AnimalId, EnclosureId};
    use domain::EnclosureError;

    fn status_of(err: impl Into<ApiError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn service_errors_map_by_reason() {
        assert_eq!(
            status_of(ServiceError::AnimalNotFound(AnimalId::new())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ServiceError::EnclosureFull {
                enclosure_id: EnclosureId::new(),
                capacity: 2,
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ServiceError::from(EnclosureError::CapacityExceeded {
                enclosure_id: EnclosureId::new(),
                capacity: 2,
            })),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(ServiceError::from(RepositoryError::Backend("gone".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_errors_are_bad_requests() {
        assert_eq!(
            status_of(ValidationError::EmptyString { field: "name" }),
            StatusCode::BAD_REQUEST
        );
    }
}
