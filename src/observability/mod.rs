// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Every diagnostic event emitted by the drills is a small struct with a
//! `Display` implementation and a [`messages::StructuredLog`] implementation:
//!
//! * No magic strings scattered through the engine code
//! * Consistent, structured `tracing` fields for each event
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::pool` - worker pool and fan-out/fan-in lifecycle
//! * `messages::timeout` - timeout race outcomes
//! * `messages::counter` - shared counter activity
//! * `messages::config` - configuration loading and validation
//!
//! # Usage
//!
//! ```rust
//! use concurrency_drills::observability::messages::pool::PoolStarted;
//! use concurrency_drills::observability::messages::StructuredLog;
//!
//! let msg = PoolStarted {
//!     drill: "worker_pool",
//!     job_count: 5,
//!     worker_count: 3,
//! };
//!
//! msg.log();
//! ```

pub mod messages;

use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber filtered by `RUST_LOG`, falling back to `default_directive`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
