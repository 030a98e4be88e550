// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Runs every drill once from a [`DrillConfig`] and gathers a serializable report.
//!
//! The drills share nothing; the runner only sequences them and times each one.

use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::DrillConfig;
use crate::engine::{run_with_timeout, FanOutFanIn, WorkerPool};
use crate::errors::ConcurrencyError;
use crate::handlers::{Double, Square};
use crate::sync::{concurrent_increment, Counter};

/// Outcome of the worker pool drill. Results are sorted since completion order is arbitrary.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WorkerPoolReport {
    pub workers: usize,
    pub job_count: usize,
    pub sorted_results: Vec<i64>,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FanOutReport {
    pub workers: usize,
    pub value_count: usize,
    pub sum: i64,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TimeoutReport {
    pub timeout_ms: u64,
    pub work_ms: u64,
    pub completed: bool,
    /// The work's value when it completed, otherwise 0.
    pub value: i64,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CounterReport {
    pub increments: usize,
    pub final_value: i64,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DrillReport {
    pub worker_pool: WorkerPoolReport,
    pub fan_out: FanOutReport,
    pub timeout: TimeoutReport,
    pub counter: CounterReport,
}

/// Everything needed to run the four drills, resolved from config.
#[derive(Debug, Clone)]
pub struct DrillRunner {
    pool: WorkerPool,
    jobs: Vec<i64>,
    fan_out: FanOutFanIn,
    nums: Vec<i64>,
    timeout: Duration,
    work: Duration,
    work_value: i64,
    increments: usize,
}

impl DrillRunner {
    pub fn from_config(cfg: &DrillConfig) -> Self {
        Self {
            pool: WorkerPool::new(cfg.worker_pool.effective_workers()),
            jobs: cfg.worker_pool.jobs.clone(),
            fan_out: FanOutFanIn::new(cfg.fan_out.effective_workers()),
            nums: cfg.fan_out.nums.clone(),
            timeout: cfg.timeout.timeout(),
            work: cfg.timeout.work_duration(),
            work_value: cfg.timeout.value,
            increments: cfg.counter.increments,
        }
    }

    pub async fn run_worker_pool(&self) -> Result<WorkerPoolReport, ConcurrencyError> {
        let start_time = Instant::now();
        let mut results = self.pool.run(self.jobs.clone(), Arc::new(Square::new())).await?;
        results.sort_unstable();

        Ok(WorkerPoolReport {
            workers: self.pool.num_workers(),
            job_count: self.jobs.len(),
            sorted_results: results,
            duration_ms: millis(start_time.elapsed()),
        })
    }

    pub async fn run_fan_out(&self) -> Result<FanOutReport, ConcurrencyError> {
        let start_time = Instant::now();
        let sum = self.fan_out.run(self.nums.clone(), Arc::new(Double::new())).await?;

        Ok(FanOutReport {
            workers: self.fan_out.workers(),
            value_count: self.nums.len(),
            sum,
            duration_ms: millis(start_time.elapsed()),
        })
    }

    pub async fn run_timeout(&self) -> TimeoutReport {
        let work = self.work;
        let value = self.work_value;
        let start_time = Instant::now();

        let (value, completed) = run_with_timeout(
            move || {
                std::thread::sleep(work);
                value
            },
            self.timeout,
        )
        .await
        .into_parts();

        TimeoutReport {
            timeout_ms: millis(self.timeout),
            work_ms: millis(self.work),
            completed,
            value,
            duration_ms: millis(start_time.elapsed()),
        }
    }

    pub async fn run_counter(&self) -> Result<CounterReport, ConcurrencyError> {
        let start_time = Instant::now();
        let counter = Arc::new(Counter::new());
        concurrent_increment(&counter, self.increments).await?;

        Ok(CounterReport {
            increments: self.increments,
            final_value: counter.value(),
            duration_ms: millis(start_time.elapsed()),
        })
    }

    /// Run the four drills one after another.
    pub async fn run_all(&self) -> Result<DrillReport, ConcurrencyError> {
        Ok(DrillReport {
            worker_pool: self.run_worker_pool().await?,
            fan_out: self.run_fan_out().await?,
            timeout: self.run_timeout().await,
            counter: self.run_counter().await?,
        })
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
