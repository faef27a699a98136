// ABOUTME: Structured error types for upstream provider failures
// ABOUTME: Carries upstream status codes so callers can tell failures from empty results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

use super::{AppError, ErrorCode};
use thiserror::Error;

/// Failure reported by an upstream data provider (USDA, Open Food Facts, `ExerciseDB`)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// Upstream rejected the request because of its rate limit (HTTP 429)
    #[error("{provider} rate limit exceeded")]
    RateLimitExceeded {
        /// Provider name
        provider: String,
    },

    /// Upstream rejected the configured API key (HTTP 401/403)
    #[error("{provider} authentication failed: {reason}")]
    AuthenticationFailed {
        /// Provider name
        provider: String,
        /// Upstream status code
        status_code: u16,
        /// Reason reported to the caller
        reason: String,
    },

    /// Requested record does not exist upstream
    #[error("{provider} has no record for {resource}")]
    NotFound {
        /// Provider name
        provider: String,
        /// Identifier of the missing record
        resource: String,
    },

    /// Any other non-success response
    #[error("{provider} API error {status_code}: {message}")]
    ApiError {
        /// Provider name
        provider: String,
        /// Upstream status code
        status_code: u16,
        /// Upstream error body or summary
        message: String,
        /// Whether repeating the request may succeed
        retryable: bool,
    },
}

impl ProviderError {
    /// Classify a non-success upstream status code
    #[must_use]
    pub fn from_status(provider: &str, status_code: u16, body: &str) -> Self {
        match status_code {
            429 => Self::RateLimitExceeded {
                provider: provider.to_owned(),
            },
            401 | 403 => Self::AuthenticationFailed {
                provider: provider.to_owned(),
                status_code,
                reason: "API key invalid or missing".to_owned(),
            },
            _ => Self::ApiError {
                provider: provider.to_owned(),
                status_code,
                message: if body.is_empty() {
                    format!("request failed with status {status_code}")
                } else {
                    body.to_owned()
                },
                retryable: status_code >= 500,
            },
        }
    }

    /// Upstream status code associated with this failure, if any
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::RateLimitExceeded { .. } => Some(429),
            Self::AuthenticationFailed { status_code, .. } | Self::ApiError { status_code, .. } => {
                Some(*status_code)
            }
            Self::NotFound { .. } => Some(404),
        }
    }

    /// Whether the caller may retry later
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimitExceeded { .. } => true,
            Self::ApiError { retryable, .. } => *retryable,
            Self::AuthenticationFailed { .. } | Self::NotFound { .. } => false,
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(error: ProviderError) -> Self {
        let code = match &error {
            ProviderError::RateLimitExceeded { .. } => ErrorCode::ExternalRateLimited,
            ProviderError::AuthenticationFailed { .. } => ErrorCode::ExternalAuthFailed,
            ProviderError::NotFound { .. } => ErrorCode::ResourceNotFound,
            ProviderError::ApiError { .. } => ErrorCode::ExternalServiceError,
        };
        let status = error.status_code();
        let mut app_error = Self::new(code, error.to_string());
        app_error.upstream_status = status;
        app_error
    }
}
