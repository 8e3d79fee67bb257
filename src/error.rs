use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

pub type ServiceResult<T> = core::result::Result<T, ServiceError>;

/// Rejections produced by the todo validators. The display text is the
/// exact plain-text body sent with the 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid Todo Priority")]
    Priority,
    #[error("Invalid Todo Status")]
    Status,
    #[error("Invalid Todo Category")]
    Category,
    #[error("Invalid Due Date")]
    DueDate,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("Todo Not Found")]
    TodoNotFound,
    #[error("{0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match self {
            ServiceError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
            ServiceError::TodoNotFound => (StatusCode::NOT_FOUND, self.to_string()).into_response(),
            ServiceError::Database(e) => {
                tracing::error!(error = %e, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
            }
        }
    }
}
