// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod loader;
mod validation;

pub mod consts;

pub use loader::{
    default_concurrency, load_and_validate_config, load_config, CounterConfig, DrillConfig,
    FanOutConfig, TimeoutConfig, WorkerPoolConfig,
};
pub use validation::validate_config;
