// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the worker pool and fan-out/fan-in drills.
//!
//! This module contains message types for logging events related to:
//! * Pool start-up and worker count decisions
//! * Per-worker completion
//! * Result collection and fan-in aggregation

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A pool of workers is about to start draining jobs.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use concurrency_drills::observability::messages::pool::PoolStarted;
///
/// let msg = PoolStarted {
///     drill: "worker_pool",
///     job_count: 5,
///     worker_count: 3,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct PoolStarted<'a> {
    pub drill: &'a str,
    pub job_count: usize,
    pub worker_count: usize,
}

impl Display for PoolStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting {}: {} jobs across {} workers",
            self.drill, self.job_count, self.worker_count
        )
    }
}

impl StructuredLog for PoolStarted<'_> {
    fn log(&self) {
        tracing::info!(
            drill = self.drill,
            job_count = self.job_count,
            worker_count = self.worker_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "pool",
            span_name = name,
            drill = self.drill,
            job_count = self.job_count,
            worker_count = self.worker_count,
        )
    }
}

/// The requested worker count was reduced to the number of jobs.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct WorkerCountClamped<'a> {
    pub drill: &'a str,
    pub requested: usize,
    pub effective: usize,
}

impl Display for WorkerCountClamped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} requested {} workers but only {} jobs exist; using {}",
            self.drill, self.requested, self.effective, self.effective
        )
    }
}

impl StructuredLog for WorkerCountClamped<'_> {
    fn log(&self) {
        tracing::debug!(
            drill = self.drill,
            requested = self.requested,
            effective = self.effective,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "worker_count_clamped",
            span_name = name,
            drill = self.drill,
            requested = self.requested,
            effective = self.effective,
        )
    }
}

/// A worker has been spawned and is about to pull jobs.
///
/// # Log Level
/// `debug!` - Diagnostic detail
///
/// # Example
/// ```
/// use concurrency_drills::observability::messages::pool::WorkerStarted;
///
/// let msg = WorkerStarted {
///     worker_id: 0,
///     handler: "double",
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct WorkerStarted<'a> {
    pub worker_id: usize,
    pub handler: &'a str,
}

impl Display for WorkerStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Worker {} ({}) started", self.worker_id, self.handler)
    }
}

impl StructuredLog for WorkerStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            worker_id = self.worker_id,
            handler = self.handler,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "worker",
            span_name = name,
            worker_id = self.worker_id,
            handler = self.handler,
        )
    }
}

/// A worker found the job channel closed and exited.
///
/// # Log Level
/// `debug!` - Diagnostic detail
///
/// # Example
/// ```
/// use concurrency_drills::observability::messages::pool::WorkerFinished;
///
/// let msg = WorkerFinished {
///     worker_id: 2,
///     handler: "square",
///     processed: 4,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct WorkerFinished<'a> {
    pub worker_id: usize,
    pub handler: &'a str,
    pub processed: usize,
}

impl Display for WorkerFinished<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Worker {} ({}) drained the job channel after {} jobs",
            self.worker_id, self.handler, self.processed
        )
    }
}

impl StructuredLog for WorkerFinished<'_> {
    fn log(&self) {
        tracing::debug!(
            worker_id = self.worker_id,
            handler = self.handler,
            processed = self.processed,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "worker_finished",
            span_name = name,
            worker_id = self.worker_id,
            handler = self.handler,
            processed = self.processed,
        )
    }
}

/// All results of a pool have been collected.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use concurrency_drills::observability::messages::pool::PoolCompleted;
/// use std::time::Duration;
///
/// let msg = PoolCompleted {
///     drill: "worker_pool",
///     result_count: 5,
///     duration: Duration::from_millis(3),
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct PoolCompleted<'a> {
    pub drill: &'a str,
    pub result_count: usize,
    pub duration: std::time::Duration,
}

impl Display for PoolCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} completed: {} results in {:?}",
            self.drill, self.result_count, self.duration
        )
    }
}

impl StructuredLog for PoolCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            drill = self.drill,
            result_count = self.result_count,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "pool_completed",
            span_name = name,
            drill = self.drill,
            result_count = self.result_count,
            duration = ?self.duration,
        )
    }
}

/// The fan-in stage has seen every producer finish and produced its total.
///
/// # Log Level
/// `info!` - Important operational event
pub struct FanInCompleted {
    pub value_count: usize,
    pub sum: i64,
    pub duration: std::time::Duration,
}

impl Display for FanInCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Fan-in aggregated {} values into {} in {:?}",
            self.value_count, self.sum, self.duration
        )
    }
}

impl StructuredLog for FanInCompleted {
    fn log(&self) {
        tracing::info!(
            value_count = self.value_count,
            sum = self.sum,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "fan_in_completed",
            span_name = name,
            value_count = self.value_count,
            sum = self.sum,
        )
    }
}

/// A worker task failed to join.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct WorkerFailed<'a> {
    pub drill: &'a str,
    pub worker_id: usize,
    pub error: &'a dyn std::error::Error,
}

impl Display for WorkerFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} worker {} failed: {}", self.drill, self.worker_id, self.error)
    }
}

impl StructuredLog for WorkerFailed<'_> {
    fn log(&self) {
        tracing::error!(
            drill = self.drill,
            worker_id = self.worker_id,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "worker_failed",
            span_name = name,
            drill = self.drill,
            worker_id = self.worker_id,
            error = %self.error,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_pool_started_display() {
        let msg = PoolStarted {
            drill: "worker_pool",
            job_count: 5,
            worker_count: 3,
        };
        assert_eq!(msg.to_string(), "Starting worker_pool: 5 jobs across 3 workers");
    }

    #[test]
    fn test_worker_count_clamped_display() {
        let msg = WorkerCountClamped {
            drill: "fan_out_fan_in",
            requested: 8,
            effective: 2,
        };
        assert_eq!(
            msg.to_string(),
            "fan_out_fan_in requested 8 workers but only 2 jobs exist; using 2"
        );
    }

    #[test]
    fn test_fan_in_completed_display() {
        let msg = FanInCompleted {
            value_count: 5,
            sum: 30,
            duration: Duration::from_millis(1),
        };
        assert!(msg.to_string().starts_with("Fan-in aggregated 5 values into 30"));
    }

    #[test]
    fn test_worker_started_display() {
        let msg = WorkerStarted {
            worker_id: 1,
            handler: "double",
        };
        assert_eq!(msg.to_string(), "Worker 1 (double) started");
    }

    #[test]
    fn test_worker_finished_display() {
        let msg = WorkerFinished {
            worker_id: 2,
            handler: "square",
            processed: 4,
        };
        assert_eq!(
            msg.to_string(),
            "Worker 2 (square) drained the job channel after 4 jobs"
        );
    }
}
