// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Problems found while validating a drill configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A drill section asked for zero workers
    ZeroWorkers {
        /// Config section that holds the bad value (`worker_pool`, `fan_out`)
        section: String,
    },
    /// The timeout drill was given a zero-length deadline
    ZeroTimeout,
    /// The timeout drill's work is configured to take longer than a sane bound
    WorkDurationTooLong {
        work_ms: u64,
        max_ms: u64,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::ZeroWorkers { section } => {
                write!(f, "Section '{}' requests 0 workers; at least 1 is required", section)
            }
            ValidationError::ZeroTimeout => {
                write!(f, "Section 'timeout' has timeout_ms = 0; the deadline must be positive")
            }
            ValidationError::WorkDurationTooLong { work_ms, max_ms } => {
                write!(
                    f,
                    "Section 'timeout' has work_ms = {} which exceeds the limit of {} ms",
                    work_ms, max_ms
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised while loading a drill configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported config extension for '{0}' (expected .yaml, .yml or .toml)")]
    UnsupportedFormat(PathBuf),

    #[error("Configuration validation failed:\n{}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
