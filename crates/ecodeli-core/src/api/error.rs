use thiserror::Error;

use super::graphql::GraphQLError;
use crate::auth::SessionError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized (HTTP 401) - session may be expired")]
    Unauthorized,

    #[error("Access denied (HTTP 403): {0}")]
    AccessDenied(String),

    #[error("Endpoint not found (HTTP 404): {0}")]
    NotFound(String),

    #[error("Rate limited (HTTP 429) - please wait before retrying")]
    RateLimited,

    #[error("Server error (HTTP {status}): {body}")]
    ServerError { status: u16, body: String },

    #[error("Unexpected HTTP status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-empty `errors` list.
    #[error("{message}")]
    Protocol {
        message: String,
        errors: Vec<GraphQLError>,
    },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::AccessDenied(truncated),
            404 => ApiError::NotFound(truncated),
            429 => ApiError::RateLimited,
            code @ 500..=599 => ApiError::ServerError {
                status: code,
                body: truncated,
            },
            code => ApiError::UnexpectedStatus {
                status: code,
                body: truncated,
            },
        }
    }

    /// HTTP status code for transport-level failures.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::AccessDenied(_) => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::RateLimited => Some(429),
            ApiError::ServerError { status, .. } | ApiError::UnexpectedStatus { status, .. } => {
                Some(*status)
            }
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Errors reported by the GraphQL server itself, if any.
    pub fn graphql_errors(&self) -> &[GraphQLError] {
        match self {
            ApiError::Protocol { errors, .. } => errors,
            _ => &[],
        }
    }
}
