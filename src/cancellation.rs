// ABOUTME: Cooperative cancellation token threaded through provider client calls
// ABOUTME: Lets a superseded search or a shutting-down server abandon in-flight upstream requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

use crate::errors::{AppError, AppResult};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

/// Cancellation handle shared between a caller and the provider call it started
///
/// Clones observe the same state. Cancelling is one-way: once cancelled a token
/// stays cancelled.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    state: Arc<watch::Sender<bool>>,
}

impl CancellationToken {
    /// Create a token that is not cancelled
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(false);
        Self {
            state: Arc::new(state),
        }
    }

    /// Cancel every call observing this token
    pub fn cancel(&self) {
        self.state.send_replace(true);
    }

    /// Whether [`cancel`](Self::cancel) has been called
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.state.borrow()
    }

    /// Resolve once the token is cancelled
    pub async fn cancelled(&self) {
        let mut receiver = self.state.subscribe();
        // The sender lives as long as `self`, so the channel cannot close here
        let _ = receiver.wait_for(|cancelled| *cancelled).await;
    }

    /// Drive `future` to completion unless the token is cancelled first
    ///
    /// # Errors
    ///
    /// Returns a `RequestCancelled` error if the token fires before `future` completes,
    /// otherwise whatever `future` returns
    pub async fn run<T, F>(&self, operation: &str, future: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        if self.is_cancelled() {
            return Err(AppError::cancelled(operation));
        }

        tokio::select! {
            biased;
            () = self.cancelled() => Err(AppError::cancelled(operation)),
            result = future => result,
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}
