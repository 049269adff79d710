//! Error types and their HTTP mapping.
//!
//! # Design
//! `ValidationError` is the only failure the service reports. The transport
//! wraps it, together with "not found" and unexpected failures, in `ApiError`,
//! which renders as a JSON `{"message": ...}` body with the matching status.
//! Internal details are logged and never sent to the client.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Input that breaks an entity rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title is required")]
    MissingTitle,

    #[error("title must not be empty")]
    EmptyTitle,

    #[error("title must be at most {max} characters, got {actual}")]
    TitleTooLong { max: usize, actual: usize },

    #[error("description must be at most {max} characters, got {actual}")]
    DescriptionTooLong { max: usize, actual: usize },
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Todo {0} not found")]
    NotFound(Uuid),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "request failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (self.status(), Json(ErrorBody::new(message))).into_response()
    }
}

/// Turns a handler panic into a 500 instead of dropping the connection.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic".to_string()
    };
    ApiError::Internal(detail).into_response()
}
