// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

/// A per-job transform run by pool workers.
///
/// Implementations must be infallible: a handler that cannot produce a value
/// for some input should wrap or saturate rather than error.
#[async_trait]
pub trait JobHandler: Send + Sync {
    async fn handle(&self, job: i64) -> i64;

    fn name(&self) -> &'static str;
}
