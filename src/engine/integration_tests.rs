use std::sync::Arc;
use std::time::Duration;

use crate::engine::{run_fan_out_fan_in, run_with_timeout, run_worker_pool, TimeoutOutcome, WorkerPool};
use crate::handlers::{DelayHandler, Square};
use crate::sync::{concurrent_increment, Counter};

/// Integration tests running the drills side by side on one runtime
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_drills_run_concurrently_without_interference() {
        let counter = Arc::new(Counter::new());

        let (pool, fan, race, increments) = tokio::join!(
            run_worker_pool((1..=20).collect(), 4),
            run_fan_out_fan_in((1..=20).collect(), 4),
            run_with_timeout(
                || {
                    std::thread::sleep(Duration::from_millis(10));
                    42
                },
                Duration::from_millis(500),
            ),
            concurrent_increment(&counter, 250),
        );

        let mut squares = pool.expect("worker pool should succeed");
        squares.sort();
        let expected: Vec<i64> = (1..=20).map(|n: i64| n * n).collect();
        assert_eq!(squares, expected);

        assert_eq!(fan, Ok(420));
        assert_eq!(race, TimeoutOutcome::Completed(42));
        assert!(increments.is_ok());
        assert_eq!(counter.value(), 250);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_large_job_list_through_small_pool() {
        let jobs: Vec<i64> = (-500..500).collect();
        let expected_sum: i64 = jobs.iter().map(|j| j * j).sum();

        let results = run_worker_pool(jobs.clone(), 3).await.unwrap();

        assert_eq!(results.len(), jobs.len());
        assert_eq!(results.iter().sum::<i64>(), expected_sum);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_timeout_around_worker_pool() {
        // A pool that needs ~10 rounds of 20ms with 1 worker cannot beat a 30ms deadline.
        let slow = Arc::new(DelayHandler::new(Arc::new(Square::new()), Duration::from_millis(20)));
        let pool = WorkerPool::new(1);

        let outcome = crate::engine::run_future_with_timeout(
            async move { pool.run((1..=10).collect(), slow).await },
            Duration::from_millis(30),
        )
        .await;

        assert!(!outcome.is_completed());
    }

    #[tokio::test]
    async fn test_shared_counter_from_pool_workers() {
        let counter = Arc::new(Counter::new());

        let tasks: Vec<_> = (0..4)
            .map(|_| {
                let counter = counter.clone();
                tokio::spawn(async move {
                    let squares = run_worker_pool(vec![1, 2, 3], 2).await.unwrap();
                    for _ in squares {
                        counter.increment();
                    }
                })
            })
            .collect();

        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(counter.value(), 12);
    }
}
