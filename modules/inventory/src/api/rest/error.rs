use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::domain::error::InventoryError;

pub type ApiResult<T> = Result<T, ApiError>;

/// REST-facing error: status code plus an `{"error": "..."}` body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<InventoryError> for ApiError {
    fn from(e: InventoryError) -> Self {
        let status = match &e {
            InventoryError::AlreadyExists(_) => StatusCode::CONFLICT,
            InventoryError::NotFound(_) => StatusCode::NOT_FOUND,
            InventoryError::Validation(_) => StatusCode::BAD_REQUEST,
            // a fetch failure during creation means the remote host, not
            // this service, is at fault
            InventoryError::Fetch(_) => StatusCode::BAD_GATEWAY,
        };
        Self {
            status,
            message: e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, message = %self.message, "request failed");
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
