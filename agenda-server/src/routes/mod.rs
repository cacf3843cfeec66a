pub mod schedules;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use agenda_core::AgendaError;

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Convert domain errors to HTTP responses.
///
/// Validation problems and missing schedules map to client-error statuses
/// so callers can tell them apart from infrastructure failures.
pub struct AppError(AgendaError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AgendaError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AgendaError::ScheduleNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<AgendaError> for AppError {
    fn from(err: AgendaError) -> Self {
        Self(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self(AgendaError::Storage(err.to_string()))
    }
}
