use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use pagesmith_core::config::ConfigDecodeError;
use pagesmith_core::config::ValidationError;
use pagesmith_core::upload::UploadError;
use pagesmith_core::variant::VariantError;

/// API error type that maps to structured JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<VariantError> for ApiError {
    fn from(err: VariantError) -> Self {
        match err {
            // The budget is a property of the existing variant set, so an
            // over-budget request conflicts with current state.
            VariantError::BudgetExceeded { .. } => ApiError::Conflict(err.to_string()),
            VariantError::InvalidWeight(_) => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::TooLarge { .. } => ApiError::PayloadTooLarge(err.to_string()),
            UploadError::NotAnImage(_) => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl From<ConfigDecodeError> for ApiError {
    fn from(err: ConfigDecodeError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "notFound", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "badRequest", msg.clone()),
            ApiError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "payloadTooLarge",
                msg.clone(),
            ),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internalError",
                    "An internal error occurred".to_string(),
                )
            }
            ApiError::Database(err) => {
                tracing::error!("Database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internalError",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": {
                "type": error_type,
                "message": message,
                "statusCode": status.as_u16(),
            }
        });

        (status, Json(body)).into_response()
    }
}

/// Convenience type alias for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_violation_maps_to_conflict_and_names_the_remainder() {
        let err: ApiError = VariantError::BudgetExceeded {
            requested: 50,
            remaining: 40,
        }
        .into();
        assert!(matches!(&err, ApiError::Conflict(msg) if msg.contains("40% remaining")));
    }

    #[test]
    fn oversized_upload_maps_to_413() {
        let err: ApiError = UploadError::TooLarge { size: 99 }.into();
        assert!(matches!(err, ApiError::PayloadTooLarge(_)));
    }
}
