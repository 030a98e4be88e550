// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use parking_lot::Mutex;
use std::sync::Arc;

use crate::errors::ConcurrencyError;
use crate::observability::messages::counter::IncrementsJoined;
use crate::observability::messages::StructuredLog;

/// An integer counter that many tasks or threads can bump at once.
///
/// Every read and write goes through one mutex, so no increment is lost and a
/// read never sees a partial update. The lock does not poison, so a panic in
/// some other holder never makes the counter unusable.
///
/// Counters are plain values: build one per scenario and share it with `Arc`.
///
/// ```
/// use concurrency_drills::sync::Counter;
///
/// let counter = Counter::new();
/// counter.increment();
/// counter.increment();
/// assert_eq!(counter.value(), 2);
/// ```
#[derive(Debug, Default)]
pub struct Counter {
    value: Mutex<i64>,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&self) {
        let mut guard = self.value.lock();
        *guard += 1;
    }

    pub fn value(&self) -> i64 {
        *self.value.lock()
    }
}

/// Spawn `times` tasks that each call [`Counter::increment`] once, and join them all.
pub async fn concurrent_increment(counter: &Arc<Counter>, times: usize) -> Result<(), ConcurrencyError> {
    let mut tasks = Vec::with_capacity(times);

    for _ in 0..times {
        let counter = Arc::clone(counter);
        tasks.push(tokio::spawn(async move {
            counter.increment();
        }));
    }

    for (index, task) in tasks.into_iter().enumerate() {
        task.await
            .map_err(|e| ConcurrencyError::from_join(index, e))?;
    }

    IncrementsJoined {
        spawned: times,
        final_value: counter.value(),
    }
    .log();

    Ok(())
}
