use crate::domain::error::DomainError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error("payload too large")]
    PayloadTooLarge,

    #[error("not found")]
    NotFound,
}

pub(crate) type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
pub(crate) struct MessageBody {
    pub(crate) message: &'static str,
}

const UNPROCESSABLE: (StatusCode, &str) = (StatusCode::UNPROCESSABLE_ENTITY, "Unprocessable Entity");
const NOT_FOUND: (StatusCode, &str) = (StatusCode::NOT_FOUND, "Not found");
const CONFLICT: (StatusCode, &str) = (StatusCode::CONFLICT, "Conflict");
const TOO_LARGE: (StatusCode, &str) = (StatusCode::PAYLOAD_TOO_LARGE, "Payload Too Large");
const INTERNAL: (StatusCode, &str) = (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");

impl AppError {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Domain(err) => match err {
                DomainError::Validation { .. } => UNPROCESSABLE,
                DomainError::NotFound(_) => NOT_FOUND,
                DomainError::Conflict(_) => CONFLICT,
                DomainError::Unexpected(_) => INTERNAL,
            },
            AppError::Validation(_) | AppError::MalformedBody(_) => UNPROCESSABLE,
            AppError::PayloadTooLarge => TOO_LARGE,
            AppError::NotFound => NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!(error = ?self, "request failed");
        }

        (status, Json(MessageBody { message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::AppError;
    use crate::domain::error::DomainError;

    #[test]
    fn domain_errors_map_to_statuses() {
        let cases = [
            (
                AppError::from(DomainError::Validation {
                    field: "title",
                    message: "must not be empty",
                }),
                StatusCode::UNPROCESSABLE_ENTITY,
                "Unprocessable Entity",
            ),
            (
                AppError::from(DomainError::NotFound("post id: 1".to_string())),
                StatusCode::NOT_FOUND,
                "Not found",
            ),
            (
                AppError::from(DomainError::Conflict("category id: 1".to_string())),
                StatusCode::CONFLICT,
                "Conflict",
            ),
            (
                AppError::from(DomainError::Unexpected("disk I/O error".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
            ),
        ];

        for (err, status, message) in cases {
            assert_eq!(err.status_and_message(), (status, message));
        }
    }

    #[test]
    fn malformed_body_is_unprocessable() {
        let err = AppError::MalformedBody("expected value at line 1 column 1".to_string());
        assert_eq!(err.status_and_message().0, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
