use axum::{ http::StatusCode, response::{ IntoResponse, Response }, Json };
use serde_json::json;
use thiserror::Error;

use crate::llm::LlmError;
use crate::models::chat::FieldError;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Invalid request data ({} field error(s))", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Gemini API error (status {status})")]
    Upstream {
        status: u16,
        body: String,
    },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<LlmError> for RelayError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::Status { status, body } => RelayError::Upstream { status, body },
            other => RelayError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            RelayError::Validation(details) =>
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "error": "Invalid request data", "details": details }),
                ),
            RelayError::Upstream { body, .. } =>
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Gemini API error", "details": body }),
                ),
            RelayError::Internal(_) =>
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "Internal server error" })),
        };
        (status, Json(body)).into_response()
    }
}
