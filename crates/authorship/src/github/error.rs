//! GitHub API error types.

use thiserror::Error;

use crate::http::HttpError;
use crate::platform::PlatformError;

/// Errors that can occur when interacting with the GitHub API.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// The request never produced a response.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error response.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid configuration (bad host URL and the like).
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<url::ParseError> for GitHubError {
    fn from(err: url::ParseError) -> Self {
        GitHubError::Config(format!("invalid URL: {}", err))
    }
}

impl From<GitHubError> for PlatformError {
    fn from(err: GitHubError) -> Self {
        match err {
            GitHubError::Http(e) => PlatformError::Network {
                message: e.to_string(),
            },
            GitHubError::Json(e) => PlatformError::Decode {
                message: format!("JSON parse error: {}", e),
            },
            GitHubError::Api { status, message } => match status {
                401 | 403 => PlatformError::AuthRequired,
                404 => PlatformError::NotFound { resource: message },
                _ => PlatformError::Api { status, message },
            },
            GitHubError::Config(message) => PlatformError::Internal { message },
        }
    }
}
