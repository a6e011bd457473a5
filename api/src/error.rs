use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use stockroom::StockroomError;
use tracing::{debug, warn};

/// Unified error type that renders as a JSON
/// `{"success": false, "message": "..."}` response with an appropriate HTTP
/// status code.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            warn!(status = %self.status, message = %self.message, "Request failed");
        } else {
            debug!(status = %self.status, message = %self.message, "Request rejected");
        }
        (
            self.status,
            Json(json!({ "success": false, "message": self.message })),
        )
            .into_response()
    }
}

impl From<StockroomError> for AppError {
    fn from(e: StockroomError) -> Self {
        match e {
            StockroomError::NotFound(msg) => AppError::not_found(msg),
            StockroomError::Validation(msg) => AppError::bad_request(msg),
            StockroomError::Conflict(msg) => AppError::conflict(msg),
            StockroomError::InsufficientStock { .. } => AppError::bad_request(e.to_string()),
            StockroomError::InvalidArgument(_) => AppError::bad_request(e.to_string()),
            StockroomError::Internal(_) => AppError::internal(e.to_string()),
            _ => AppError::internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_status_codes() {
        let cases = [
            (StockroomError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (StockroomError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (StockroomError::Conflict("x".into()), StatusCode::CONFLICT),
            (
                StockroomError::InsufficientStock {
                    title: "Tee".into(),
                    requested: 2,
                    available: 1,
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                StockroomError::Internal("worker panicked".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).status, status);
        }
    }
}
