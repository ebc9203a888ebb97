use crate::error::SoilCheckError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

impl SoilCheckError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SoilCheckError::MissingFields(_) | SoilCheckError::AlreadyExists => {
                StatusCode::BAD_REQUEST
            }
            SoilCheckError::InvalidCredentials | SoilCheckError::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            SoilCheckError::NotFound(_) => StatusCode::NOT_FOUND,
            SoilCheckError::Request(rejection) => rejection.status(),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SoilCheckError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal details stay in the log
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
