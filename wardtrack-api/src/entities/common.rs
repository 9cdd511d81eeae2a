use axum::{
    extract::rejection::JsonRejection,
    extract::FromRequest,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::patient::Patient;

/// Error response format for the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code - machine-readable identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    /// Create a not found error response
    pub fn not_found(resource: &str) -> Self {
        Self {
            error: "not_found".to_string(),
            message: format!("The requested {} could not be found", resource),
        }
    }

    /// Create a validation error response
    pub fn validation_error(message: &str) -> Self {
        Self {
            error: "validation_error".to_string(),
            message: message.to_string(),
        }
    }

    /// Create an internal error response. Internal store details stay out of
    /// the response body.
    pub fn internal_error() -> Self {
        Self {
            error: "internal_error".to_string(),
            message: "An unexpected error occurred".to_string(),
        }
    }
}

impl From<JsonRejection> for ErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation_error(&rejection.body_text())
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = match self.error.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "validation_error" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(self)).into_response()
    }
}

/// JSON body extractor that answers 400 with the standard error shape when
/// the body cannot be deserialized, instead of axum's default 422
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ErrorResponse))]
pub struct ApiJson<T>(pub T);

/// Confirmation payload for delete operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[aliases(PatientDeleteConfirmation = DeleteConfirmation<Patient>)]
pub struct DeleteConfirmation<T> {
    /// Human-readable confirmation message
    pub message: String,

    /// The deleted record
    pub deleted: T,
}
