//! Error handling - maps domain failures to RPC-coded problem responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use posts_core::{Code, DomainError};
use posts_shared::ErrorResponse;

/// Application-level error type that converts to problem-details responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn code(&self) -> Code {
        match self {
            AppError::InvalidArgument(_) => Code::InvalidArgument,
            AppError::NotFound(_) => Code::NotFound,
            AppError::Internal(_) => Code::Internal,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let detail = match self {
            AppError::InvalidArgument(detail) | AppError::NotFound(detail) => detail,
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                detail
            }
        };

        let error = ErrorResponse::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or("Error"),
            self.code().as_str(),
        )
        .with_detail(detail.as_str());

        HttpResponse::build(status).json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let detail = err.to_string();
        match err.code() {
            Code::InvalidArgument => AppError::InvalidArgument(detail),
            Code::NotFound => AppError::NotFound(detail),
            Code::Internal => AppError::Internal(detail),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
