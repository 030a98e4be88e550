// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Handlers for exercising pool behavior in tests and demos.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::traits::JobHandler;

/// Wraps another handler with a fixed delay and tracks how many invocations
/// overlap, so callers can check that a pool never exceeds its worker bound.
pub struct DelayHandler {
    inner: Arc<dyn JobHandler>,
    delay: Duration,
    active: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

impl DelayHandler {
    pub fn new(inner: Arc<dyn JobHandler>, delay: Duration) -> Self {
        Self {
            inner,
            delay,
            active: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    /// Highest number of `handle` calls that were in flight at once.
    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// Total number of completed `handle` calls.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JobHandler for DelayHandler {
    async fn handle(&self, job: i64) -> i64 {
        let now_active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now_active, Ordering::SeqCst);

        tokio::time::sleep(self.delay).await;
        let out = self.inner.handle(job).await;

        self.active.fetch_sub(1, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);
        out
    }

    fn name(&self) -> &'static str {
        "delay"
    }
}

/// Panics when it sees `poison`, otherwise echoes the job.
pub struct PanickingHandler {
    pub poison: i64,
}

impl PanickingHandler {
    pub fn new(poison: i64) -> Self {
        Self { poison }
    }
}

#[async_trait]
impl JobHandler for PanickingHandler {
    async fn handle(&self, job: i64) -> i64 {
        if job == self.poison {
            panic!("poisoned job {}", job);
        }
        job
    }

    fn name(&self) -> &'static str {
        "panicking"
    }
}
