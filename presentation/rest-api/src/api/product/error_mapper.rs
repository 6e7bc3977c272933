use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::product::errors::ProductError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for ProductError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name) = match &self {
            ProductError::InvalidIdentifier => (StatusCode::BAD_REQUEST, "InvalidIdentifier"),
            ProductError::NotFound => (StatusCode::NOT_FOUND, "NotFound"),
            ProductError::Unauthenticated => (StatusCode::UNAUTHORIZED, "Unauthenticated"),
            ProductError::TitleEmpty | ProductError::Validation(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "ValidationError")
            }
            ProductError::Upload(_) => (StatusCode::UNPROCESSABLE_ENTITY, "UploadError"),
            ProductError::Cleanup(_) => (StatusCode::UNPROCESSABLE_ENTITY, "CleanupError"),
            ProductError::Repository(_) => (StatusCode::INTERNAL_SERVER_ERROR, "InternalError"),
        };

        // Store internals stay out of 500 bodies.
        let message = match &self {
            ProductError::Repository(_) => "repository.persistence".to_string(),
            other => other.to_string(),
        };

        (status, Json(ErrorResponse::new(name, message)))
    }
}
