// ABOUTME: Unified error handling for provider clients, cache, and proxy endpoints
// ABOUTME: Defines ErrorCode, AppError, and the JSON error body shapes returned over HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

//! # Unified Error Handling
//!
//! Every provider-client operation returns [`AppResult`]. An empty result set is
//! `Ok(vec![])`; an upstream failure is an `Err` that keeps the upstream status
//! code in [`AppError::upstream_status`]. The same error type renders the proxy
//! endpoints' JSON error bodies when the `http-response` feature is enabled.

/// Upstream provider error taxonomy
pub mod provider;

pub use provider::ProviderError;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client input (3000-3999)
    /// Input failed validation
    InvalidInput = 3000,
    /// A required parameter is missing
    MissingRequiredField = 3001,
    /// A parameter has the wrong shape
    InvalidFormat = 3002,
    /// HTTP method not supported by the endpoint
    MethodNotAllowed = 3003,

    // Resources (4000-4999)
    /// Record does not exist
    ResourceNotFound = 4000,

    // External services (5000-5999)
    /// Upstream returned a non-success status
    ExternalServiceError = 5000,
    /// Upstream could not be reached (connect failure, timeout)
    ExternalServiceUnavailable = 5001,
    /// Upstream rejected the API key
    ExternalAuthFailed = 5002,
    /// Upstream rate limit hit
    ExternalRateLimited = 5003,
    /// Caller abandoned the request
    RequestCancelled = 5004,

    // Configuration (6000-6999)
    /// Configuration is missing or invalid
    ConfigError = 6000,

    // Internal (9000-9999)
    /// Unexpected internal fault
    InternalError = 9000,
    /// Cache backend failure
    StorageError = 9002,
    /// Payload could not be encoded or decoded
    SerializationError = 9003,
}

impl ErrorCode {
    /// HTTP status used when no upstream status is attached
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput | Self::MissingRequiredField | Self::InvalidFormat => 400,
            Self::ResourceNotFound => 404,
            Self::MethodNotAllowed => 405,
            Self::ExternalRateLimited => 429,
            Self::ExternalServiceError | Self::ExternalAuthFailed => 502,
            Self::RequestCancelled => 503,
            Self::ExternalServiceUnavailable
            | Self::ConfigError
            | Self::InternalError
            | Self::StorageError
            | Self::SerializationError => 500,
        }
    }

    /// Short description of this error class
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required parameter is missing",
            Self::InvalidFormat => "The parameter format is invalid",
            Self::MethodNotAllowed => "The HTTP method is not allowed",
            Self::ResourceNotFound => "The requested record was not found",
            Self::ExternalServiceError => "An upstream provider returned an error",
            Self::ExternalServiceUnavailable => "An upstream provider is unreachable",
            Self::ExternalAuthFailed => "Authentication with the upstream provider failed",
            Self::ExternalRateLimited => "Upstream provider rate limit exceeded",
            Self::RequestCancelled => "The request was cancelled",
            Self::ConfigError => "Configuration error",
            Self::InternalError => "An internal error occurred",
            Self::StorageError => "Cache storage operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether this code describes a problem with the caller's input
    #[must_use]
    pub const fn is_client_error(self) -> bool {
        matches!(
            self,
            Self::InvalidInput
                | Self::MissingRequiredField
                | Self::InvalidFormat
                | Self::MethodNotAllowed
                | Self::ResourceNotFound
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Unified error type for the gateway
#[derive(Debug, Error)]
#[error("{code}: {message}")]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Status code reported by the upstream provider, when the failure came from one
    pub upstream_status: Option<u16>,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            upstream_status: None,
            source: None,
        }
    }

    /// Attach a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// HTTP status for this error; the upstream status wins when present
    #[must_use]
    pub fn http_status(&self) -> u16 {
        self.upstream_status
            .unwrap_or_else(|| self.code.http_status())
    }

    /// Whether the call was abandoned through its cancellation token
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.code == ErrorCode::RequestCancelled
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Missing required parameter
    pub fn missing_field(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingRequiredField, message)
    }

    /// Malformed parameter
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidFormat, message)
    }

    /// Unsupported HTTP method
    #[must_use]
    pub fn method_not_allowed() -> Self {
        Self::new(ErrorCode::MethodNotAllowed, "Method not allowed")
    }

    /// Record not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Internal fault
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Cache storage failure
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Encoding or decoding failure
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }

    /// Upstream error without a status code
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// Upstream could not be reached at all
    pub fn upstream_unreachable(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceUnavailable,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// Call abandoned through its cancellation token
    pub fn cancelled(operation: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::RequestCancelled,
            format!("{} was cancelled", operation.into()),
        )
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error.to_string()).with_source(error)
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::storage(error.to_string()).with_source(error)
    }
}

/// JSON error body returned by the proxy endpoints
///
/// Client input errors render as `{error}`, upstream failures as
/// `{error, status}`, and internal faults as `{error, message}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Short error summary
    pub error: String,
    /// Upstream status code, for upstream failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Fault detail, for internal errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&AppError> for ErrorBody {
    fn from(error: &AppError) -> Self {
        if let Some(status) = error.upstream_status {
            return Self {
                error: error.message.clone(),
                status: Some(status),
                message: None,
            };
        }

        if error.code.is_client_error() || error.code == ErrorCode::RequestCancelled {
            return Self {
                error: error.message.clone(),
                status: None,
                message: None,
            };
        }

        Self {
            error: "Internal server error".to_owned(),
            status: None,
            message: Some(error.message.clone()),
        }
    }
}

#[cfg(feature = "http-response")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = http::StatusCode::from_u16(self.http_status())
            .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() && self.upstream_status.is_none() {
            tracing::error!(code = ?self.code, message = %self.message, "Request failed");
        }

        (status, axum::Json(ErrorBody::from(&self))).into_response()
    }
}
