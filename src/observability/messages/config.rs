// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for configuration loading and validation.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A config file was parsed.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ConfigLoaded<'a> {
    pub path: &'a str,
    pub format: &'a str,
}

impl Display for ConfigLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Loaded {} drill config from '{}'", self.format, self.path)
    }
}

impl StructuredLog for ConfigLoaded<'_> {
    fn log(&self) {
        tracing::info!(path = self.path, format = self.format, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("config_loaded", span_name = name, path = self.path, format = self.format)
    }
}

/// Validation rejected a config.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use concurrency_drills::observability::messages::config::ConfigRejected;
///
/// let msg = ConfigRejected {
///     path: "drills.yaml",
///     error_count: 2,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct ConfigRejected<'a> {
    pub path: &'a str,
    pub error_count: usize,
}

impl Display for ConfigRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Config '{}' failed validation with {} error(s)",
            self.path, self.error_count
        )
    }
}

impl StructuredLog for ConfigRejected<'_> {
    fn log(&self) {
        tracing::error!(path = self.path, error_count = self.error_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "config_rejected",
            span_name = name,
            path = self.path,
            error_count = self.error_count,
        )
    }
}
