// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Fan-out/fan-in pipeline.
//!
//! All inputs are loaded into a buffered channel which is closed immediately,
//! then `workers` tasks drain it in parallel (fan-out). Every transformed value
//! goes to one result channel that a single aggregator folds into a sum
//! (fan-in). The aggregator returns only after the result channel has closed,
//! i.e. after every producer has exited; the running total is never exposed.
//!
//! The sum wraps on overflow. Wrapping addition is associative, so the total
//! does not depend on completion order and is exact whenever the true sum fits
//! in `i64`.

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, Mutex};
use tracing::Instrument;

use crate::engine::workers::{join_workers, resolve_worker_count, spawn_workers, SharedJobs};
use crate::errors::ConcurrencyError;
use crate::handlers::Double;
use crate::observability::messages::pool::{FanInCompleted, PoolStarted};
use crate::observability::messages::StructuredLog;
use crate::traits::JobHandler;

const DRILL: &str = "fan_out_fan_in";

/// Parallel map followed by a serial sum.
#[derive(Debug, Clone, Copy)]
pub struct FanOutFanIn {
    workers: usize,
}

impl FanOutFanIn {
    pub fn new(workers: usize) -> Self {
        Self { workers }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Apply `handler` to every value concurrently and return the sum of the outputs.
    pub async fn run(
        &self,
        nums: Vec<i64>,
        handler: Arc<dyn JobHandler>,
    ) -> Result<i64, ConcurrencyError> {
        let value_count = nums.len();
        let workers = resolve_worker_count(DRILL, self.workers, value_count)?;
        if value_count == 0 {
            return Ok(0);
        }

        let start_msg = PoolStarted {
            drill: DRILL,
            job_count: value_count,
            worker_count: workers,
        };
        let span = start_msg.span("fan_out_fan_in_run");
        start_msg.log();

        Self::execute(nums, workers, handler).instrument(span).await
    }

    async fn execute(
        nums: Vec<i64>,
        workers: usize,
        handler: Arc<dyn JobHandler>,
    ) -> Result<i64, ConcurrencyError> {
        let value_count = nums.len();
        let start_time = Instant::now();

        // Fan-out source: pre-filled and closed before any worker starts.
        let (input_tx, input_rx) = mpsc::channel::<i64>(value_count);
        for n in nums {
            input_tx
                .send(n)
                .await
                .map_err(|e| ConcurrencyError::InternalError {
                    message: format!("failed to enqueue input: {}", e),
                })?;
        }
        drop(input_tx);

        let (output_tx, mut output_rx) = mpsc::channel::<i64>(workers);
        let shared_input: SharedJobs = Arc::new(Mutex::new(input_rx));
        let tasks = spawn_workers(workers, shared_input, output_tx, handler);

        // Fan-in: `recv` yields `None` only once every worker's sender is gone.
        let mut sum: i64 = 0;
        let mut received = 0;
        while let Some(value) = output_rx.recv().await {
            sum = sum.wrapping_add(value);
            received += 1;
        }

        join_workers(DRILL, tasks).await?;

        if received != value_count {
            return Err(ConcurrencyError::InternalError {
                message: format!("aggregated {} of {} values", received, value_count),
            });
        }

        FanInCompleted {
            value_count: received,
            sum,
            duration: start_time.elapsed(),
        }
        .log();

        Ok(sum)
    }
}

/// Double every number across `workers` concurrent tasks and return the total.
///
/// Always equal to `2 * nums.iter().sum()`; concurrency does not change the result.
pub async fn run_fan_out_fan_in(nums: Vec<i64>, workers: usize) -> Result<i64, ConcurrencyError> {
    FanOutFanIn::new(workers)
        .run(nums, Arc::new(Double::new()))
        .await
}
