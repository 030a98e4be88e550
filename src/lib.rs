// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;     // drill config loading + validation
pub mod engine;     // worker pool, fan-out/fan-in, timeout race, channel drills
pub mod errors;     // error handling
pub mod handlers;   // job transforms
pub mod observability;
pub mod runner;     // runs every drill from a config
pub mod sync;       // mutex-protected counter
pub mod traits;     // unified abstractions
