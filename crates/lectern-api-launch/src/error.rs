//! Error types for the launch API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lectern_keys::KeySourceError;
use serde::Serialize;
use utoipa::ToSchema;

/// Errors surfaced by the launch API.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    /// The login initiation request carried no obtainable parameter
    /// collection (unreadable or malformed form body).
    #[error("Malformed login request: {0}")]
    RequestMalformed(String),

    /// The key source could not resolve the tool key.
    #[error("Key source unavailable: {0}")]
    KeySourceUnavailable(#[from] KeySourceError),

    /// Deploy-time configuration fault.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result alias for launch operations.
pub type LaunchResult<T> = Result<T, LaunchError>;

/// JSON error body returned by launch endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Stable machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

impl IntoResponse for LaunchError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            LaunchError::RequestMalformed(detail) => (
                StatusCode::BAD_REQUEST,
                "request_malformed",
                format!("Malformed login request: {detail}"),
            ),
            LaunchError::KeySourceUnavailable(source_err) => {
                tracing::error!(error = %source_err, "Key source failure");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "key_source_unavailable",
                    "The tool signing key could not be resolved".to_string(),
                )
            }
            LaunchError::Configuration(detail) => {
                tracing::error!(detail = %detail, "Launch configuration error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "configuration_error",
                    "The service is misconfigured".to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}
