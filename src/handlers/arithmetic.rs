// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::traits::JobHandler;

/// Squares each job. Saturates at `i64::MAX` instead of overflowing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Square;

impl Square {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl JobHandler for Square {
    async fn handle(&self, job: i64) -> i64 {
        job.saturating_mul(job)
    }

    fn name(&self) -> &'static str {
        "square"
    }
}

/// Doubles each job with two's-complement wrapping.
///
/// Wrapping keeps a sum of doubled values exact whenever the true total fits
/// in `i64`, regardless of the order the values are added in.
#[derive(Debug, Default, Clone, Copy)]
pub struct Double;

impl Double {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl JobHandler for Double {
    async fn handle(&self, job: i64) -> i64 {
        job.wrapping_mul(2)
    }

    fn name(&self) -> &'static str {
        "double"
    }
}
