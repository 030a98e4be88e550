// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod arithmetic;
pub mod stub;

pub use arithmetic::{Double, Square};
pub use stub::{DelayHandler, PanickingHandler};
