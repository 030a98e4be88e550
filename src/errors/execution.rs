// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised by the concurrent drills.
//!
//! Hitting a deadline is not listed here: the timeout race reports it as a
//! plain [`TimeoutOutcome::TimedOut`](crate::engine::timeout::TimeoutOutcome) value.

use thiserror::Error;
use tokio::task::JoinError;

/// Errors that can occur while running a worker pool or fan-out/fan-in pipeline
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConcurrencyError {
    /// Caller asked for zero workers
    #[error("worker count must be at least 1, got {0}")]
    InvalidWorkerCount(usize),

    /// A spawned worker task panicked or was aborted before finishing
    #[error("worker {worker} did not finish: {message}")]
    WorkerPanicked { worker: usize, message: String },

    /// Channel or join bookkeeping went wrong
    #[error("internal error: {message}")]
    InternalError { message: String },
}

impl ConcurrencyError {
    /// Build a `WorkerPanicked` from the join error of worker `worker`.
    pub fn from_join(worker: usize, err: JoinError) -> Self {
        let message = if err.is_panic() {
            let payload = err.into_panic();
            payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "panic with non-string payload".to_string())
        } else {
            err.to_string()
        };

        ConcurrencyError::WorkerPanicked { worker, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_worker_count_message() {
        let err = ConcurrencyError::InvalidWorkerCount(0);
        assert_eq!(err.to_string(), "worker count must be at least 1, got 0");
    }

    #[tokio::test]
    async fn test_from_join_captures_panic_message() {
        let handle = tokio::spawn(async {
            panic!("boom");
        });
        let join_err = handle.await.unwrap_err();

        match ConcurrencyError::from_join(7, join_err) {
            ConcurrencyError::WorkerPanicked { worker, message } => {
                assert_eq!(worker, 7);
                assert_eq!(message, "boom");
            }
            other => panic!("Expected WorkerPanicked, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_from_join_formatted_panic_message() {
        let handle = tokio::spawn(async {
            let id = 3;
            panic!("worker {} exploded", id);
        });
        let join_err = handle.await.unwrap_err();

        let err = ConcurrencyError::from_join(3, join_err);
        assert_eq!(err.to_string(), "worker 3 did not finish: worker 3 exploded");
    }
}
