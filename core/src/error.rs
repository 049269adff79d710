//! Error types for the todo API client.
//!
//! `NotFound` and `BadRequest` get dedicated variants because callers branch
//! on them: one means the todo is gone, the other carries the server's
//! validation message. Every other unexpected status lands in `HttpError`
//! with the raw status code and body.

use thiserror::Error;

/// Errors returned by `TodoClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404: the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server rejected the input (400).
    #[error("bad request: {message}")]
    BadRequest { message: String },

    /// The server returned any other unexpected status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
