// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::MAX_WORK_MS;
use crate::config::DrillConfig;
use crate::errors::ValidationError;

/// Check a loaded config, collecting every problem rather than stopping at the first.
///
/// Worker counts left unset are fine (they default to available parallelism);
/// only an explicit `0` is rejected. Empty job lists are allowed.
pub fn validate_config(cfg: &DrillConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if cfg.worker_pool.workers == Some(0) {
        errors.push(ValidationError::ZeroWorkers {
            section: "worker_pool".to_string(),
        });
    }

    if cfg.fan_out.workers == Some(0) {
        errors.push(ValidationError::ZeroWorkers {
            section: "fan_out".to_string(),
        });
    }

    if cfg.timeout.timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if cfg.timeout.work_ms > MAX_WORK_MS {
        errors.push(ValidationError::WorkDurationTooLong {
            work_ms: cfg.timeout.work_ms,
            max_ms: MAX_WORK_MS,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
