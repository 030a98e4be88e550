// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for human-readable output and
//! [`StructuredLog`] to emit the same event with structured `tracing` fields.
//!
//! # Organization
//!
//! * `pool` - worker pool and fan-out/fan-in lifecycle
//! * `timeout` - timeout race outcomes
//! * `counter` - shared counter activity
//! * `config` - configuration loading and validation
//!
//! # Usage Pattern
//!
//! ```rust
//! use concurrency_drills::observability::messages::timeout::DeadlineElapsed;
//! use std::time::Duration;
//!
//! let msg = DeadlineElapsed {
//!     timeout: Duration::from_millis(50),
//! };
//!
//! tracing::warn!("{}", msg);
//! ```

use tracing::Span;

pub mod config;
pub mod counter;
pub mod pool;
pub mod timeout;

/// A log message that knows its own level and structured fields.
pub trait StructuredLog {
    /// Emit the message as a `tracing` event at its natural level.
    fn log(&self);

    /// Build a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
