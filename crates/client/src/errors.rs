//! Typed error surface for API calls.

use serde::Serialize;
use thiserror::Error;

/// A non-2xx response from the backend. `message` carries the
/// server-provided `detail`/`message` field when present, else the HTTP
/// status text.
#[derive(Debug, Serialize, Error)]
#[error("{status_code}: {message}")]
pub struct ApiError {
    pub status_code: u16,
    pub message: String,
}

impl ApiError {
    /// The error used for mutations attempted without a session token.
    #[must_use]
    pub fn unauthenticated() -> Self {
        Self {
            status_code: 401,
            message: "authentication required".to_owned(),
        }
    }
}
