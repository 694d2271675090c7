//! Error types for the annotation metadata service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Result type for the metadata library functions
pub type Result<T> = std::result::Result<T, MetadataError>;

/// Errors raised while deriving metadata from an annotation
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Malformed URI '{uri}': {source}")]
    MalformedUri {
        uri: String,
        #[source]
        source: url::ParseError,
    },
}

/// Application error type for the HTTP layer
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),
}

/// Result type for HTTP handlers
pub type AppResult<T> = std::result::Result<T, AppError>;

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            AppError::Metadata(e) => {
                tracing::debug!("Metadata error: {}", e);
                match e {
                    MetadataError::MalformedUri { uri, .. } => (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        "malformed_uri",
                        format!("Malformed URI: {}", uri),
                    ),
                }
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
            details: if cfg!(debug_assertions) {
                Some(self.to_string())
            } else {
                None
            },
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_uri_status() {
        let source = url::Url::parse("not a uri").unwrap_err();
        let err = AppError::from(MetadataError::MalformedUri {
            uri: "not a uri".to_string(),
            source,
        });

        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_bad_request_status() {
        let response = AppError::BadRequest("nope".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
