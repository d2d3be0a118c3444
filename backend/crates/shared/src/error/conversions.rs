//! HTTP rendering of [`AppError`]

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use super::app_error::AppError;

/// Body is `{"message": ...}`, plus `"action"` when a hint was attached.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut body = json!({ "message": self.message() });
        if let Some(action) = self.action() {
            body["action"] = Value::from(action);
        }

        (status, Json(body)).into_response()
    }
}

/// Unreadable JSON bodies are client errors in the common shape.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}
