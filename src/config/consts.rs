/// Worker count used when a section leaves `workers` unset and parallelism cannot be detected
pub const FALLBACK_WORKERS: usize = 4;
/// Default deadline for the timeout drill (milliseconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 100;
/// Default simulated work duration for the timeout drill (milliseconds)
pub const DEFAULT_WORK_MS: u64 = 10;
/// Default value returned by the timeout drill's work
pub const DEFAULT_WORK_VALUE: i64 = 42;
/// Upper bound on simulated work (milliseconds); abandoned work holds a blocking thread this long
pub const MAX_WORK_MS: u64 = 60_000;
/// Default number of concurrent increments for the counter drill
pub const DEFAULT_INCREMENTS: usize = 1000;

/// Default inputs for the worker pool and fan-out drills
pub const DEFAULT_INPUTS: [i64; 5] = [1, 2, 3, 4, 5];
