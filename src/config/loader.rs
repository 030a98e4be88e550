// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{
    DEFAULT_INCREMENTS, DEFAULT_INPUTS, DEFAULT_TIMEOUT_MS, DEFAULT_WORK_MS, DEFAULT_WORK_VALUE,
    FALLBACK_WORKERS,
};
use crate::errors::ConfigError;
use crate::observability::messages::config::{ConfigLoaded, ConfigRejected};
use crate::observability::messages::StructuredLog;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Configuration for one run of the drills.
///
/// Every section is optional; missing sections fall back to the built-in
/// defaults in [`crate::config::consts`].
///
/// # Example
/// ```yaml
/// worker_pool:
///   workers: 3
///   jobs: [1, 2, 3, 4, 5]
/// fan_out:
///   workers: 3
///   nums: [1, 2, 3, 4, 5]
/// timeout:
///   timeout_ms: 100
///   work_ms: 10
///   value: 42
/// counter:
///   increments: 1000
/// ```
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct DrillConfig {
    #[serde(default)]
    pub worker_pool: WorkerPoolConfig,
    #[serde(default)]
    pub fan_out: FanOutConfig,
    #[serde(default)]
    pub timeout: TimeoutConfig,
    #[serde(default)]
    pub counter: CounterConfig,
}

/// Worker pool drill settings.
///
/// `workers` defaults to the machine's available parallelism.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct WorkerPoolConfig {
    pub workers: Option<usize>,
    #[serde(default = "default_inputs")]
    pub jobs: Vec<i64>,
}

impl Default for WorkerPoolConfig {
    fn default() -> Self {
        Self {
            workers: None,
            jobs: default_inputs(),
        }
    }
}

impl WorkerPoolConfig {
    pub fn effective_workers(&self) -> usize {
        self.workers.unwrap_or_else(default_concurrency)
    }
}

/// Fan-out/fan-in drill settings.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FanOutConfig {
    pub workers: Option<usize>,
    #[serde(default = "default_inputs")]
    pub nums: Vec<i64>,
}

impl Default for FanOutConfig {
    fn default() -> Self {
        Self {
            workers: None,
            nums: default_inputs(),
        }
    }
}

impl FanOutConfig {
    pub fn effective_workers(&self) -> usize {
        self.workers.unwrap_or_else(default_concurrency)
    }
}

/// Timeout drill settings: simulated work of `work_ms` returning `value`,
/// raced against a `timeout_ms` deadline.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TimeoutConfig {
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_work_ms")]
    pub work_ms: u64,
    #[serde(default = "default_work_value")]
    pub value: i64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            work_ms: DEFAULT_WORK_MS,
            value: DEFAULT_WORK_VALUE,
        }
    }
}

impl TimeoutConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn work_duration(&self) -> Duration {
        Duration::from_millis(self.work_ms)
    }
}

/// Counter drill settings.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CounterConfig {
    #[serde(default = "default_increments")]
    pub increments: usize,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            increments: DEFAULT_INCREMENTS,
        }
    }
}

fn default_inputs() -> Vec<i64> {
    DEFAULT_INPUTS.to_vec()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_work_ms() -> u64 {
    DEFAULT_WORK_MS
}

fn default_work_value() -> i64 {
    DEFAULT_WORK_VALUE
}

fn default_increments() -> usize {
    DEFAULT_INCREMENTS
}

/// Number of available CPU cores, falling back to [`FALLBACK_WORKERS`] if detection fails.
pub fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(FALLBACK_WORKERS)
}

/// Load a config from a `.yaml`/`.yml` or `.toml` file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<DrillConfig, ConfigError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let (cfg, format): (DrillConfig, &str) = match extension.as_deref() {
        Some("yaml") | Some("yml") => (serde_yaml::from_str(&content)?, "YAML"),
        Some("toml") => (toml::from_str(&content)?, "TOML"),
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    ConfigLoaded {
        path: &path.display().to_string(),
        format,
    }
    .log();

    Ok(cfg)
}

/// Load and validate a config file.
///
/// All validation problems are reported together in [`ConfigError::Invalid`].
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<DrillConfig, ConfigError> {
    let path = path.as_ref();
    let cfg = load_config(path)?;

    if let Err(validation_errors) = crate::config::validate_config(&cfg) {
        ConfigRejected {
            path: &path.display().to_string(),
            error_count: validation_errors.len(),
        }
        .log();
        return Err(ConfigError::Invalid(validation_errors));
    }

    Ok(cfg)
}
