// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Bounded worker pool.
//!
//! A dispatcher task feeds jobs into a bounded channel and closes it once the
//! last job is submitted. A fixed number of workers pull from that channel,
//! transform each job, and push the output to a result channel. The caller
//! collects until the result channel closes.
//!
//! ```text
//!  jobs ──► dispatcher ──► [job channel] ──┬─► worker 0 ─┐
//!                                          ├─► worker 1 ─┼─► [result channel] ──► collector
//!                                          └─► worker N ─┘
//! ```
//!
//! Results arrive in completion order, which is not the submission order.
//!
//! # Examples
//!
//! ```rust
//! use concurrency_drills::engine::worker_pool::run_worker_pool;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut squares = run_worker_pool(vec![1, 2, 3, 4, 5], 3).await?;
//! squares.sort();
//! assert_eq!(squares, vec![1, 4, 9, 16, 25]);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, Mutex};
use tracing::Instrument;

use crate::engine::workers::{join_workers, resolve_worker_count, spawn_workers, SharedJobs};
use crate::errors::ConcurrencyError;
use crate::handlers::Square;
use crate::observability::messages::pool::{PoolCompleted, PoolStarted};
use crate::observability::messages::StructuredLog;
use crate::traits::JobHandler;

const DRILL: &str = "worker_pool";

/// Runs a list of jobs through at most `num_workers` concurrent workers.
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    num_workers: usize,
}

impl WorkerPool {
    /// Create a pool that will start at most `num_workers` workers per run.
    ///
    /// The count is validated when [`WorkerPool::run`] is called, so a pool
    /// built with `0` reports `InvalidWorkerCount` rather than panicking here.
    pub fn new(num_workers: usize) -> Self {
        Self { num_workers }
    }

    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Transform every job with `handler`, returning one output per job in no particular order.
    pub async fn run(
        &self,
        jobs: Vec<i64>,
        handler: Arc<dyn JobHandler>,
    ) -> Result<Vec<i64>, ConcurrencyError> {
        let job_count = jobs.len();
        let workers = resolve_worker_count(DRILL, self.num_workers, job_count)?;
        if job_count == 0 {
            return Ok(Vec::new());
        }

        let start_msg = PoolStarted {
            drill: DRILL,
            job_count,
            worker_count: workers,
        };
        let span = start_msg.span("worker_pool_run");
        start_msg.log();

        Self::execute(jobs, workers, handler).instrument(span).await
    }

    async fn execute(
        jobs: Vec<i64>,
        workers: usize,
        handler: Arc<dyn JobHandler>,
    ) -> Result<Vec<i64>, ConcurrencyError> {
        let job_count = jobs.len();
        let start_time = Instant::now();

        // Bounded to the worker count so the dispatcher waits on slow workers.
        let (job_tx, job_rx) = mpsc::channel::<i64>(workers);
        let (result_tx, mut result_rx) = mpsc::channel::<i64>(workers);
        let shared_jobs: SharedJobs = Arc::new(Mutex::new(job_rx));

        let tasks = spawn_workers(workers, shared_jobs, result_tx, handler);

        let dispatcher = tokio::spawn(async move {
            for job in jobs {
                if job_tx.send(job).await.is_err() {
                    // Every worker has exited; remaining jobs have no taker.
                    break;
                }
            }
            // Dropping `job_tx` closes the job channel.
        });

        let mut results = Vec::with_capacity(job_count);
        while let Some(output) = result_rx.recv().await {
            results.push(output);
        }

        dispatcher.await.map_err(|e| ConcurrencyError::InternalError {
            message: format!("job dispatcher failed: {}", e),
        })?;
        join_workers(DRILL, tasks).await?;

        if results.len() != job_count {
            return Err(ConcurrencyError::InternalError {
                message: format!("collected {} results for {} jobs", results.len(), job_count),
            });
        }

        PoolCompleted {
            drill: DRILL,
            result_count: results.len(),
            duration: start_time.elapsed(),
        }
        .log();

        Ok(results)
    }
}

/// Square every job using `num_workers` concurrent workers.
///
/// Output order is unspecified; sort before comparing. `num_workers == 0` is
/// rejected with [`ConcurrencyError::InvalidWorkerCount`]; more workers than
/// jobs is clamped to the job count.
pub async fn run_worker_pool(jobs: Vec<i64>, num_workers: usize) -> Result<Vec<i64>, ConcurrencyError> {
    WorkerPool::new(num_workers)
        .run(jobs, Arc::new(Square::new()))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::{DelayHandler, Double, PanickingHandler};
    use std::time::Duration;

    fn sorted(mut values: Vec<i64>) -> Vec<i64> {
        values.sort();
        values
    }

    #[tokio::test]
    async fn test_worker_pool_squares_jobs() {
        let result = run_worker_pool(vec![1, 2, 3, 4, 5], 3).await.unwrap();

        assert_eq!(result.len(), 5);
        assert_eq!(sorted(result), vec![1, 4, 9, 16, 25]);
    }

    #[tokio::test]
    async fn test_worker_pool_independent_of_worker_count() {
        let jobs = vec![7, -3, 0, 12, 5, 5, -8, 1];
        let expected = sorted(jobs.iter().map(|j| j * j).collect());

        for workers in 1..=jobs.len() {
            let result = run_worker_pool(jobs.clone(), workers).await.unwrap();
            assert_eq!(sorted(result), expected, "workers = {}", workers);
        }
    }

    #[tokio::test]
    async fn test_worker_pool_keeps_duplicates() {
        let result = run_worker_pool(vec![2, 2, -2, 2], 2).await.unwrap();
        assert_eq!(result, vec![4, 4, 4, 4]);
    }

    #[tokio::test]
    async fn test_worker_pool_zero_workers_is_error() {
        let result = run_worker_pool(vec![1, 2, 3], 0).await;
        assert_eq!(result, Err(ConcurrencyError::InvalidWorkerCount(0)));
    }

    #[tokio::test]
    async fn test_worker_pool_empty_jobs() {
        let result = run_worker_pool(vec![], 4).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_worker_pool_more_workers_than_jobs() {
        let result = run_worker_pool(vec![3, 4], 16).await.unwrap();
        assert_eq!(sorted(result), vec![9, 16]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_worker_pool_boundary_values() {
        let limit = i128::from(i64::MAX);
        let jobs = vec![i64::MAX, i64::MIN, 3_037_000_499, 3_037_000_500, -3_037_000_500, 0, -1];
        let expected: Vec<i64> = sorted(
            jobs.iter()
                .map(|j| i128::from(*j) * i128::from(*j))
                .map(|sq| i64::try_from(sq.min(limit)).unwrap())
                .collect(),
        );

        for workers in [1, 3, jobs.len()] {
            let result = run_worker_pool(jobs.clone(), workers).await.unwrap();
            assert_eq!(sorted(result), expected, "workers = {}", workers);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_worker_pool_respects_worker_bound() {
        let handler = Arc::new(DelayHandler::new(
            Arc::new(Square::new()),
            Duration::from_millis(10),
        ));

        let pool = WorkerPool::new(2);
        let result = pool
            .run((1..=10).collect(), handler.clone())
            .await
            .unwrap();

        assert_eq!(result.len(), 10);
        assert_eq!(handler.calls(), 10);
        assert!(handler.peak_concurrency() <= 2);
        assert!(handler.peak_concurrency() >= 1);
    }

    #[tokio::test]
    async fn test_worker_pool_custom_handler() {
        let pool = WorkerPool::new(3);
        assert_eq!(pool.num_workers(), 3);

        let result = pool.run(vec![1, 2, 3], Arc::new(Double::new())).await.unwrap();
        assert_eq!(sorted(result), vec![2, 4, 6]);
    }

    #[tokio::test]
    async fn test_worker_pool_surfaces_worker_panic() {
        let pool = WorkerPool::new(1);
        let result = pool
            .run(vec![1, 2, 99, 4], Arc::new(PanickingHandler::new(99)))
            .await;

        match result {
            Err(ConcurrencyError::WorkerPanicked { worker, message }) => {
                assert_eq!(worker, 0);
                assert_eq!(message, "poisoned job 99");
            }
            other => panic!("Expected WorkerPanicked, got {:?}", other),
        }
    }
}
