//! Global application error types and handlers.
//!
//! Every endpoint fails with one of two kinds, and both render the same JSON
//! envelope: `{ "success": false, "error_code": .., "message": .. }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Not Found")]
    NotFound,

    #[error("Unprocessable")]
    Unprocessable,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            success: false,
            error_code: self.status().as_u16(),
            message: self.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error_code: u16,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.to_body())).into_response()
    }
}

/// Fallback for routes that match nothing.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
