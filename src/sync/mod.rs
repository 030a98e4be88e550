// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod counter;

pub use counter::{concurrent_increment, Counter};
