//! Error types for the Cloze client.
//!
//! # Design
//! Failures split by remediation. `Transport` and `Timeout` mean no response
//! was obtained and the call may be retried as-is. `Api` means the server
//! answered and rejected the request, so the request itself needs fixing.
//! `Encoding` is raised before any I/O happens.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

/// Errors returned by `ClozeClient` and every resource module.
#[derive(Debug, Error)]
pub enum ClozeError {
    /// The request never reached the server or no response came back.
    #[error("transport error: {0}")]
    Transport(String),

    /// No response within the configured per-call timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The server responded and reported a failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A query or body value could not be serialized.
    #[error("encoding failed: {0}")]
    Encoding(String),

    /// A successful response body was not valid JSON.
    #[error("decoding failed: {0}")]
    Decoding(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ClozeError {
    /// True when no response was obtained from the server.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClozeError::Transport(_) | ClozeError::Timeout(_))
    }

    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            ClozeError::Api(err) => Some(err),
            _ => None,
        }
    }

    /// HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        self.as_api().map(|err| err.status)
    }
}

/// Coarse classification of an [`ApiError`] by HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    Authentication,
    RateLimited,
    Validation,
    NotFound,
    Server,
    Other,
}

/// A failure reported by the remote API.
///
/// `errorcode` is Cloze's application-level code from the response body,
/// when present. `payload` holds the decoded body if it was JSON.
#[derive(Debug, Clone, Error)]
#[error("Cloze API error (status {status}): {message}")]
pub struct ApiError {
    pub status: u16,
    pub errorcode: Option<i64>,
    pub message: String,
    pub payload: Option<Value>,
}

impl ApiError {
    pub fn kind(&self) -> ApiErrorKind {
        match self.status {
            401 | 403 => ApiErrorKind::Authentication,
            429 => ApiErrorKind::RateLimited,
            400 | 422 => ApiErrorKind::Validation,
            404 => ApiErrorKind::NotFound,
            500..=599 => ApiErrorKind::Server,
            _ => ApiErrorKind::Other,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClozeError>;
