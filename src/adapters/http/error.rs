//! API error type shared by the JSON endpoints.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde::Serialize;

use crate::domain::order::OrderError;

/// JSON error body: `{"success": false, "error": CODE, "message": ...}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: message.into(),
        }
    }
}

/// API error that converts order errors to HTTP responses.
///
/// The provider notify endpoint does NOT use this type; it answers the
/// bare provider token, not JSON.
pub struct ApiError(pub OrderError);

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// HTTP status for the wrapped error.
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            OrderError::NotFound(_) => StatusCode::NOT_FOUND,
            OrderError::InvalidPayMethod(_)
            | OrderError::Validation { .. }
            | OrderError::AmountMismatch { .. } => StatusCode::BAD_REQUEST,
            OrderError::SignatureMismatch => StatusCode::UNAUTHORIZED,
            OrderError::NotPaid(_) => StatusCode::PAYMENT_REQUIRED,
            OrderError::AlreadyConsumed(_) => StatusCode::CONFLICT,
            OrderError::OrderNoExhausted | OrderError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            OrderError::Analyzer(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let body = ErrorResponse::new(self.0.code(), self.0.to_string());
        (status, Json(body)).into_response()
    }
}
