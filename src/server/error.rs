use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, warn};
use serde_json::json;
use thiserror::Error;

use crate::trivia::{ErrorKind, OrchestratorError};

/// Errors returned to HTTP callers. Messages are fixed strings; details only
/// go to the log.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request body")]
    BadRequest(String),

    #[error(transparent)]
    Orchestrator(#[from] OrchestratorError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Orchestrator(e) if e.kind() == ErrorKind::InvalidRequest => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Orchestrator(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "Invalid request body",
            ApiError::Orchestrator(e) => match e.kind() {
                ErrorKind::InvalidRequest => "Question must not be empty",
                ErrorKind::UpstreamUnavailable => "The trivia model is currently unavailable",
                ErrorKind::EmptyOutput => "The trivia model returned an empty response",
                ErrorKind::MalformedModelOutput => {
                    "The trivia model returned a response that could not be understood"
                }
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::BadRequest(detail) => warn!("Rejected request body: {detail}"),
            ApiError::Orchestrator(e) if status.is_client_error() => warn!("Rejected request: {e}"),
            ApiError::Orchestrator(e) => error!("Trivia operation failed: {e}"),
        }

        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}
