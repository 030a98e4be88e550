// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the shared counter.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A batch of concurrent increments has been joined.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use concurrency_drills::observability::messages::counter::IncrementsJoined;
///
/// let msg = IncrementsJoined {
///     spawned: 1000,
///     final_value: 1000,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct IncrementsJoined {
    pub spawned: usize,
    pub final_value: i64,
}

impl Display for IncrementsJoined {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Joined {} concurrent increments; counter now reads {}",
            self.spawned, self.final_value
        )
    }
}

impl StructuredLog for IncrementsJoined {
    fn log(&self) {
        tracing::info!(
            spawned = self.spawned,
            final_value = self.final_value,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "increments_joined",
            span_name = name,
            spawned = self.spawned,
            final_value = self.final_value,
        )
    }
}
