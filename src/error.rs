//! Article repository error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

/// Errors raised while serving article requests
///
/// Every variant except [`ArticleError::Io`] is produced by a request handler
/// and is turned directly into an HTTP response. `Io` only surfaces when the
/// listener cannot be bound or served, which is fatal to the process.
#[derive(Error, Debug)]
pub enum ArticleError {
    /// HTTP method not supported on the collection path
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Create request sent with a content-type other than `application/json`
    #[error("need content-type 'application/json', but got '{0}'")]
    UnsupportedMediaType(String),

    /// Create request body is not a valid article
    #[error("{0}")]
    MalformedJson(serde_json::Error),

    /// Request body could not be read
    #[error("{0}")]
    BodyRead(String),

    /// Response payload could not be encoded
    #[error("{0}")]
    Serialization(serde_json::Error),

    /// No article with this id, or the path does not name one
    #[error("Not found")]
    NotFound,

    /// IO error while binding or serving the listener
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ArticleError {
    /// HTTP status code for this error
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::MalformedJson(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::BodyRead(_) | Self::Serialization(_) | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ArticleError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed with {}: {}", status, self);
        } else {
            warn!("Request rejected with {}: {}", status, self);
        }
        match self {
            // 404 carries no body
            Self::NotFound => status.into_response(),
            other => (status, other.to_string()).into_response(),
        }
    }
}

/// Result type alias using ArticleError
pub type Result<T> = std::result::Result<T, ArticleError>;
