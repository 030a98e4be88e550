// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Race a computation against a deadline.
//!
//! The computation is spawned, then a single `select!` waits on two events:
//! the computation's completion and a sleep of `timeout`. Whichever fires first
//! decides the outcome. When both are ready at the same poll the winner is
//! unspecified.
//!
//! # Abandoned work
//!
//! [`run_with_timeout`] and [`run_future_with_timeout`] do **not** cancel the
//! computation when the deadline wins. It keeps running in the background
//! until it finishes on its own, and its result is dropped. Whatever it holds
//! (a blocking-pool thread, memory, open handles) stays in use for that long.
//! Callers that need the work to stop should use [`run_with_cancellation`] and
//! have the work observe its token.

use std::future::Future;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::observability::messages::timeout::{
    DeadlineElapsed, WorkCancelled, WorkCompleted, WorkPanicked,
};
use crate::observability::messages::StructuredLog;

/// Result of racing work against a deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeoutOutcome<T> {
    /// The work finished first and produced this value.
    Completed(T),
    /// The deadline elapsed first.
    TimedOut,
}

impl<T> TimeoutOutcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, TimeoutOutcome::Completed(_))
    }

    pub fn value(self) -> Option<T> {
        match self {
            TimeoutOutcome::Completed(value) => Some(value),
            TimeoutOutcome::TimedOut => None,
        }
    }

    /// `(value, true)` on completion, `(T::default(), false)` on timeout.
    pub fn into_parts(self) -> (T, bool)
    where
        T: Default,
    {
        match self {
            TimeoutOutcome::Completed(value) => (value, true),
            TimeoutOutcome::TimedOut => (T::default(), false),
        }
    }
}

impl<T> From<TimeoutOutcome<T>> for Option<T> {
    fn from(outcome: TimeoutOutcome<T>) -> Self {
        outcome.value()
    }
}

/// Run a blocking closure on the blocking pool and wait at most `timeout` for it.
///
/// On timeout the closure is left running (see the module docs). A panic inside
/// `work` that is observed before the deadline is re-raised on the caller.
pub async fn run_with_timeout<T, F>(work: F, timeout: Duration) -> TimeoutOutcome<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let handle = tokio::task::spawn_blocking(work);
    let outcome = race(handle, timeout).await;

    if !outcome.is_completed() {
        DeadlineElapsed { timeout }.log();
    }
    outcome
}

/// Spawn `work` onto the runtime and wait at most `timeout` for it.
///
/// Same abandonment rules as [`run_with_timeout`]: the spawned task is detached,
/// not aborted, when the deadline wins.
pub async fn run_future_with_timeout<T, Fut>(work: Fut, timeout: Duration) -> TimeoutOutcome<T>
where
    Fut: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let handle = tokio::spawn(work);
    let outcome = race(handle, timeout).await;

    if !outcome.is_completed() {
        DeadlineElapsed { timeout }.log();
    }
    outcome
}

/// Like [`run_future_with_timeout`], but hands `work` a token that is cancelled
/// when the deadline wins.
///
/// Cancellation is cooperative: work that never checks the token still runs
/// to completion in the background.
pub async fn run_with_cancellation<T, F, Fut>(work: F, timeout: Duration) -> TimeoutOutcome<T>
where
    F: FnOnce(CancellationToken) -> Fut,
    Fut: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let token = CancellationToken::new();
    let handle = tokio::spawn(work(token.child_token()));
    let outcome = race(handle, timeout).await;

    if !outcome.is_completed() {
        token.cancel();
        WorkCancelled { timeout }.log();
    }
    outcome
}

async fn race<T>(handle: JoinHandle<T>, timeout: Duration) -> TimeoutOutcome<T> {
    let start_time = Instant::now();

    tokio::select! {
        joined = handle => match joined {
            Ok(value) => {
                WorkCompleted {
                    elapsed: start_time.elapsed(),
                    timeout,
                }
                .log();
                TimeoutOutcome::Completed(value)
            }
            Err(join_error) if join_error.is_panic() => {
                WorkPanicked { error: &join_error }.log();
                std::panic::resume_unwind(join_error.into_panic())
            }
            Err(join_error) => {
                // Only happens while the runtime is shutting down.
                WorkPanicked { error: &join_error }.log();
                TimeoutOutcome::TimedOut
            }
        },
        _ = tokio::time::sleep(timeout) => TimeoutOutcome::TimedOut,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_with_timeout_success() {
        let fast = || {
            std::thread::sleep(Duration::from_millis(10));
            42
        };

        let (result, ok) = run_with_timeout(fast, Duration::from_millis(100))
            .await
            .into_parts();

        assert!(ok, "expected success, got timeout");
        assert_eq!(result, 42);
    }

    #[tokio::test]
    async fn test_with_timeout_failure_returns_near_deadline() {
        let slow = || {
            std::thread::sleep(Duration::from_millis(200));
            42
        };

        let start = Instant::now();
        let (result, ok) = run_with_timeout(slow, Duration::from_millis(50))
            .await
            .into_parts();
        let elapsed = start.elapsed();

        assert!(!ok, "expected timeout, got success");
        assert_eq!(result, 0);
        assert!(elapsed >= Duration::from_millis(50));
        assert!(elapsed < Duration::from_millis(180), "returned after {:?}", elapsed);
    }

    #[tokio::test]
    async fn test_abandoned_work_keeps_running() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = finished.clone();

        let outcome = run_with_timeout(
            move || {
                std::thread::sleep(Duration::from_millis(60));
                flag.store(true, Ordering::SeqCst);
                1
            },
            Duration::from_millis(10),
        )
        .await;

        assert_eq!(outcome, TimeoutOutcome::TimedOut);
        assert!(!finished.load(Ordering::SeqCst));

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(finished.load(Ordering::SeqCst), "abandoned work should run to completion");
    }

    #[tokio::test]
    async fn test_future_with_timeout_success() {
        let outcome = run_future_with_timeout(
            async {
                tokio::time::sleep(Duration::from_millis(5)).await;
                "done"
            },
            Duration::from_millis(200),
        )
        .await;

        assert_eq!(outcome, TimeoutOutcome::Completed("done"));
    }

    #[tokio::test]
    async fn test_future_with_timeout_failure() {
        let outcome = run_future_with_timeout(
            async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                7
            },
            Duration::from_millis(20),
        )
        .await;

        assert!(!outcome.is_completed());
        assert_eq!(outcome.value(), None);
    }

    #[tokio::test]
    async fn test_cancellation_token_fires_on_timeout() {
        let observed = Arc::new(AtomicBool::new(false));
        let seen = observed.clone();

        let outcome = run_with_cancellation(
            move |token| async move {
                tokio::select! {
                    _ = token.cancelled() => {
                        seen.store(true, Ordering::SeqCst);
                        -1
                    }
                    _ = tokio::time::sleep(Duration::from_secs(5)) => 1,
                }
            },
            Duration::from_millis(20),
        )
        .await;

        assert_eq!(outcome, TimeoutOutcome::TimedOut);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(observed.load(Ordering::SeqCst), "work should observe cancellation");
    }

    #[tokio::test]
    async fn test_cancellation_not_triggered_on_success() {
        let outcome = run_with_cancellation(
            |token| async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                token.is_cancelled()
            },
            Duration::from_millis(200),
        )
        .await;

        assert_eq!(outcome, TimeoutOutcome::Completed(false));
    }

    #[tokio::test]
    #[should_panic(expected = "work blew up")]
    async fn test_panic_before_deadline_is_propagated() {
        let _ = run_with_timeout(|| -> i32 { panic!("work blew up") }, Duration::from_secs(1)).await;
    }

    #[test]
    fn test_outcome_helpers() {
        let done: TimeoutOutcome<i32> = TimeoutOutcome::Completed(5);
        assert!(done.is_completed());
        assert_eq!(done.clone().into_parts(), (5, true));
        assert_eq!(Option::from(done), Some(5));

        let late: TimeoutOutcome<i32> = TimeoutOutcome::TimedOut;
        assert!(!late.is_completed());
        assert_eq!(late.into_parts(), (0, false));
    }
}
