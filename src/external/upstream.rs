// ABOUTME: Executes upstream provider requests under a cancellation token
// ABOUTME: Classifies transport failures and non-success statuses into AppError with categorized logs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

use crate::cancellation::CancellationToken;
use crate::errors::{provider::ProviderError, AppError, AppResult};
use bytes::Bytes;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Longest upstream error body carried into an error message
const MAX_ERROR_BODY_CHARS: usize = 256;

/// Send `request` to `service` and return the raw success body
///
/// The token is honored for the whole exchange, including reading the body.
///
/// # Errors
///
/// Returns an error when the token is cancelled, the upstream cannot be
/// reached, or it answers with a non-success status (the status is kept in
/// `upstream_status`)
pub async fn send(
    service: &str,
    operation: &str,
    request: RequestBuilder,
    token: &CancellationToken,
) -> AppResult<Bytes> {
    token
        .run(operation, async {
            let response = request.send().await.map_err(|e| {
                warn!(service, operation, error = %e, "Upstream request failed");
                AppError::upstream_unreachable(service, e.to_string()).with_source(e)
            })?;

            let status = response.status();
            debug!(service, operation, status = status.as_u16(), "Upstream responded");

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let error = ProviderError::from_status(service, status.as_u16(), truncate(&body));
                log_provider_error(service, operation, &error);
                return Err(error.into());
            }

            response.bytes().await.map_err(|e| {
                AppError::upstream_unreachable(service, format!("failed to read response body: {e}"))
                    .with_source(e)
            })
        })
        .await
}

/// Decode an upstream body
///
/// # Errors
///
/// Returns a serialization error naming `service` when the body is not the
/// expected JSON
pub fn decode_json<T: DeserializeOwned>(service: &str, body: &[u8]) -> AppResult<T> {
    serde_json::from_slice(body).map_err(|e| {
        AppError::serialization(format!("{service} returned an unreadable response: {e}"))
            .with_source(e)
    })
}

fn log_provider_error(service: &str, operation: &str, error: &ProviderError) {
    match error {
        ProviderError::RateLimitExceeded { .. } => {
            warn!(service, operation, "Upstream rate limit exceeded (429)");
        }
        ProviderError::AuthenticationFailed { status_code, .. } => {
            warn!(
                service,
                operation,
                status = status_code,
                "Upstream API key invalid or missing"
            );
        }
        ProviderError::NotFound { .. } | ProviderError::ApiError { .. } => {
            warn!(
                service,
                operation,
                retryable = error.is_retryable(),
                error = %error,
                "Upstream request unsuccessful"
            );
        }
    }
}

fn truncate(body: &str) -> &str {
    match body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((index, _)) => &body[..index],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let long = "é".repeat(MAX_ERROR_BODY_CHARS + 10);
        assert_eq!(truncate(&long).chars().count(), MAX_ERROR_BODY_CHARS);
        assert_eq!(truncate("short"), "short");
    }

    #[test]
    fn test_decode_json_reports_service() {
        let error = decode_json::<serde_json::Value>("USDA", b"<html>").unwrap_err();
        assert!(error.message.contains("USDA"));
        assert_eq!(error.http_status(), 500);
    }
}
