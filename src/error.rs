use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use common::MessageResponse;
use thiserror::Error;

/// Failure of a request, rendered as `{"message": ...}` with the matching status.
///
/// Messages are safe to show to callers; underlying causes are logged by the
/// handler before it builds one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    /// Malformed body or a reference to a row that does not exist
    #[error("{0}")]
    Unprocessable(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(MessageResponse::new(self.to_string()))).into_response()
    }
}
