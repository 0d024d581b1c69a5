//! API client error types

use reqwest::StatusCode;
use thiserror::Error;

use crate::session::SessionError;
use crate::validation::ValidationErrors;

/// Errors returned by the authenticated API client
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (connection, timeout, TLS)
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status
    ///
    /// `message` is the response body, or the status line when the body is empty.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The response body was not the JSON shape the caller asked for
    #[error("Unexpected response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request body could not be serialized
    #[error("Request build error: {0}")]
    Encode(#[source] serde_json::Error),

    /// A caller-supplied header was not valid HTTP
    #[error("Invalid header {0}")]
    InvalidHeader(String),

    /// Input was rejected before any request was sent
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// The session store could not be read or written
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

impl ApiError {
    /// Build an HTTP error from the status and raw body text
    pub fn from_response(status: StatusCode, body: String) -> Self {
        let message = if body.is_empty() {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.as_str().to_string())
        } else {
            body
        };

        ApiError::Http {
            status: status.as_u16(),
            message,
        }
    }

    /// HTTP status of the failed response, if there was one
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend rejected the session (HTTP 401)
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED.as_u16())
    }

    /// Whether the requested resource does not exist (HTTP 404)
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND.as_u16())
    }
}

/// Result type alias for API calls
pub type ApiResult<T> = Result<T, ApiError>;
