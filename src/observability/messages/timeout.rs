// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the timeout race.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// The computation finished before the deadline.
///
/// # Log Level
/// `debug!` - Diagnostic detail
///
/// # Example
/// ```
/// use concurrency_drills::observability::messages::timeout::WorkCompleted;
/// use std::time::Duration;
///
/// let msg = WorkCompleted {
///     elapsed: Duration::from_millis(10),
///     timeout: Duration::from_millis(100),
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct WorkCompleted {
    pub elapsed: Duration,
    pub timeout: Duration,
}

impl Display for WorkCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Work completed in {:?} (deadline {:?})",
            self.elapsed, self.timeout
        )
    }
}

impl StructuredLog for WorkCompleted {
    fn log(&self) {
        tracing::debug!(
            elapsed_ms = self.elapsed.as_millis() as u64,
            timeout_ms = self.timeout.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "work_completed",
            span_name = name,
            elapsed = ?self.elapsed,
            timeout = ?self.timeout,
        )
    }
}

/// The deadline won the race; the computation was left running.
///
/// # Log Level
/// `warn!` - The caller gets no result
pub struct DeadlineElapsed {
    pub timeout: Duration,
}

impl Display for DeadlineElapsed {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Deadline of {:?} elapsed before work completed; abandoning computation",
            self.timeout
        )
    }
}

impl StructuredLog for DeadlineElapsed {
    fn log(&self) {
        tracing::warn!(timeout_ms = self.timeout.as_millis() as u64, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("deadline_elapsed", span_name = name, timeout = ?self.timeout)
    }
}

/// The deadline won and the computation was signalled to stop.
///
/// # Log Level
/// `warn!` - The caller gets no result
pub struct WorkCancelled {
    pub timeout: Duration,
}

impl Display for WorkCancelled {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Deadline of {:?} elapsed; cancellation requested",
            self.timeout
        )
    }
}

impl StructuredLog for WorkCancelled {
    fn log(&self) {
        tracing::warn!(timeout_ms = self.timeout.as_millis() as u64, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("work_cancelled", span_name = name, timeout = ?self.timeout)
    }
}

/// The computation panicked before either side of the race could finish cleanly.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct WorkPanicked<'a> {
    pub error: &'a dyn std::error::Error,
}

impl Display for WorkPanicked<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Timed computation did not finish: {}", self.error)
    }
}

impl StructuredLog for WorkPanicked<'_> {
    fn log(&self) {
        tracing::error!(error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!("work_panicked", span_name = name, error = %self.error)
    }
}
