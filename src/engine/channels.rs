// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Small channel drills: send/receive, buffering, closing, selecting, and
//! joining a batch of tasks.

use tokio::sync::{mpsc, oneshot};

use crate::errors::ConcurrencyError;

/// A spawned task sends `42`; the caller receives it.
pub async fn channel_basics() -> i64 {
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let _ = tx.send(42);
    });

    rx.await.unwrap_or_default()
}

/// Fill a capacity-3 channel with `1, 2, 3` without any receiving task, then drain it.
pub async fn buffered_channel() -> Vec<i64> {
    let (tx, mut rx) = mpsc::channel(3);

    for value in 1..=3 {
        // Capacity is 3, so none of these wait.
        if tx.try_send(value).is_err() {
            break;
        }
    }
    drop(tx);

    let mut values = Vec::with_capacity(3);
    while let Some(value) = rx.recv().await {
        values.push(value);
    }
    values
}

/// A spawned task sums `nums` and sends the total back.
///
/// Sums wrap on overflow, so the result is exact whenever the true total fits in `i64`.
pub async fn sum_with_channel(nums: Vec<i64>) -> i64 {
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let total = nums.iter().fold(0i64, |acc, n| acc.wrapping_add(*n));
        let _ = tx.send(total);
    });

    rx.await.unwrap_or_default()
}

/// A producer sends `0..count` then closes; the consumer drains in order.
pub async fn collect_from_channel(count: usize) -> Vec<i64> {
    let (tx, mut rx) = mpsc::channel(1);

    tokio::spawn(async move {
        for index in 0..count {
            let Ok(value) = i64::try_from(index) else {
                break;
            };
            if tx.send(value).await.is_err() {
                break;
            }
        }
        // `tx` dropped here: the channel is now closed.
    });

    let mut values = Vec::with_capacity(count);
    while let Some(value) = rx.recv().await {
        values.push(value);
    }
    values
}

/// Return the first value to arrive on either receiver.
///
/// A receiver that closes without a value drops out of the race. `None` is
/// returned only once both receivers are closed and empty.
pub async fn select_first<T>(first: &mut mpsc::Receiver<T>, second: &mut mpsc::Receiver<T>) -> Option<T> {
    tokio::select! {
        Some(value) = first.recv() => Some(value),
        Some(value) = second.recv() => Some(value),
        else => None,
    }
}

/// Sum each slice in its own task, wait for all of them, and total the partial sums.
///
/// Partial sums arrive in completion order; wrapping addition makes the total
/// independent of that order.
pub async fn sum_parallel(slices: Vec<Vec<i64>>) -> Result<i64, ConcurrencyError> {
    let (tx, mut rx) = mpsc::channel(slices.len().max(1));
    let mut tasks = Vec::with_capacity(slices.len());

    for slice in slices {
        let tx = tx.clone();
        tasks.push(tokio::spawn(async move {
            let partial = slice.iter().fold(0i64, |acc, n| acc.wrapping_add(*n));
            let _ = tx.send(partial).await;
        }));
    }
    drop(tx);

    // Equivalent of a wait group: every task must be joined before totalling.
    for (index, task) in tasks.into_iter().enumerate() {
        task.await
            .map_err(|e| ConcurrencyError::from_join(index, e))?;
    }

    let mut total: i64 = 0;
    while let Some(partial) = rx.recv().await {
        total = total.wrapping_add(partial);
    }
    Ok(total)
}
