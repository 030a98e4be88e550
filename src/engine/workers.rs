// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Worker plumbing shared by the worker pool and the fan-out/fan-in pipeline.
//!
//! Both drills follow the same shape: a single job channel whose receiver is
//! shared by `N` workers behind an async mutex, and a single result channel
//! that every worker holds a sender for. A job is received by exactly one
//! worker. The result channel closes only once every worker has exited, which
//! is the barrier the collectors rely on.

use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::errors::ConcurrencyError;
use crate::observability::messages::pool::{
    WorkerCountClamped, WorkerFailed, WorkerFinished, WorkerStarted,
};
use crate::observability::messages::StructuredLog;
use crate::traits::JobHandler;

/// Receiver end of the job channel, shared by every worker.
pub type SharedJobs = Arc<Mutex<mpsc::Receiver<i64>>>;

/// Decide how many workers to actually start.
///
/// Zero workers is a caller error. More workers than jobs is clamped to the
/// job count so no worker is spawned only to find the channel already closed.
/// An empty job list yields `Ok(0)`.
pub fn resolve_worker_count(
    drill: &str,
    requested: usize,
    job_count: usize,
) -> Result<usize, ConcurrencyError> {
    if requested == 0 {
        return Err(ConcurrencyError::InvalidWorkerCount(requested));
    }

    let effective = requested.min(job_count);
    if effective < requested && job_count > 0 {
        WorkerCountClamped {
            drill,
            requested,
            effective,
        }
        .log();
    }

    Ok(effective)
}

/// Spawn `count` workers that pull from `jobs`, run `handler`, and push to `results`.
///
/// The caller's `results` sender is consumed; once the returned tasks have all
/// exited, the result channel is closed.
pub fn spawn_workers(
    count: usize,
    jobs: SharedJobs,
    results: mpsc::Sender<i64>,
    handler: Arc<dyn JobHandler>,
) -> Vec<JoinHandle<()>> {
    let mut tasks = Vec::with_capacity(count);

    for worker_id in 0..count {
        let started = WorkerStarted {
            worker_id,
            handler: handler.name(),
        };
        let span = started.span("worker");
        started.log();

        let task = tokio::spawn(
            worker_loop(worker_id, jobs.clone(), results.clone(), handler.clone()).instrument(span),
        );
        tasks.push(task);
    }

    tasks
}

async fn worker_loop(
    worker_id: usize,
    jobs: SharedJobs,
    results: mpsc::Sender<i64>,
    handler: Arc<dyn JobHandler>,
) {
    let mut processed = 0;

    loop {
        // Lock only long enough to take one job.
        let next = {
            let mut receiver = jobs.lock().await;
            receiver.recv().await
        };

        let Some(job) = next else {
            break;
        };

        let output = handler.handle(job).await;
        if results.send(output).await.is_err() {
            // Collector went away; nothing left to deliver to.
            break;
        }
        processed += 1;
    }

    WorkerFinished {
        worker_id,
        handler: handler.name(),
        processed,
    }
    .log();
}

/// Await every worker, returning the first failure after all have been joined.
pub async fn join_workers(drill: &str, tasks: Vec<JoinHandle<()>>) -> Result<(), ConcurrencyError> {
    let mut first_error = None;

    for (worker_id, task) in tasks.into_iter().enumerate() {
        if let Err(join_error) = task.await {
            let error = ConcurrencyError::from_join(worker_id, join_error);
            WorkerFailed {
                drill,
                worker_id,
                error: &error,
            }
            .log();

            if first_error.is_none() {
                first_error = Some(error);
            }
        }
    }

    match first_error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::{PanickingHandler, Square};

    #[test]
    fn test_resolve_zero_workers_is_error() {
        assert_eq!(
            resolve_worker_count("test", 0, 5),
            Err(ConcurrencyError::InvalidWorkerCount(0))
        );
        assert_eq!(
            resolve_worker_count("test", 0, 0),
            Err(ConcurrencyError::InvalidWorkerCount(0))
        );
    }

    #[test]
    fn test_resolve_clamps_to_job_count() {
        assert_eq!(resolve_worker_count("test", 10, 3), Ok(3));
        assert_eq!(resolve_worker_count("test", 3, 10), Ok(3));
        assert_eq!(resolve_worker_count("test", 4, 4), Ok(4));
    }

    #[test]
    fn test_resolve_empty_jobs() {
        assert_eq!(resolve_worker_count("test", 3, 0), Ok(0));
    }

    #[tokio::test]
    async fn test_workers_drain_channel_and_close_results() {
        let (job_tx, job_rx) = mpsc::channel(8);
        let (result_tx, mut result_rx) = mpsc::channel(8);
        let jobs: SharedJobs = Arc::new(Mutex::new(job_rx));

        let tasks = spawn_workers(2, jobs, result_tx, Arc::new(Square::new()));

        for job in [1, 2, 3] {
            job_tx.send(job).await.unwrap();
        }
        drop(job_tx);

        let mut results = Vec::new();
        while let Some(value) = result_rx.recv().await {
            results.push(value);
        }
        results.sort();

        assert_eq!(results, vec![1, 4, 9]);
        assert!(join_workers("test", tasks).await.is_ok());
    }

    #[tokio::test]
    async fn test_join_reports_panicked_worker() {
        let (job_tx, job_rx) = mpsc::channel(4);
        let (result_tx, mut result_rx) = mpsc::channel(4);
        let jobs: SharedJobs = Arc::new(Mutex::new(job_rx));

        let tasks = spawn_workers(1, jobs, result_tx, Arc::new(PanickingHandler::new(13)));

        job_tx.send(13).await.unwrap();
        drop(job_tx);

        // The panicking worker drops its sender while unwinding.
        assert_eq!(result_rx.recv().await, None);

        match join_workers("test", tasks).await {
            Err(ConcurrencyError::WorkerPanicked { worker, message }) => {
                assert_eq!(worker, 0);
                assert_eq!(message, "poisoned job 13");
            }
            other => panic!("Expected WorkerPanicked, got {:?}", other),
        }
    }
}
