pub mod channels;
pub mod fan_out_fan_in;
pub mod timeout;
pub mod worker_pool;
pub mod workers;
#[cfg(test)]
pub mod integration_tests;

pub use fan_out_fan_in::{run_fan_out_fan_in, FanOutFanIn};
pub use timeout::{run_future_with_timeout, run_with_cancellation, run_with_timeout, TimeoutOutcome};
pub use worker_pool::{run_worker_pool, WorkerPool};
