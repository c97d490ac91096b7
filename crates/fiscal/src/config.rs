//! Service configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default cache TTL: 24 hours.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Default number of tickers resolved concurrently.
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Configuration for [`FundamentalsService`](crate::FundamentalsService).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Age after which cached rows and statements are discarded.
    pub cache_ttl: Duration,
    /// Upper bound on tickers processed at once by batch operations.
    pub max_concurrency: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            cache_ttl: DEFAULT_CACHE_TTL,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

impl ServiceConfig {
    /// Sets the cache TTL.
    #[must_use]
    pub const fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Sets the batch concurrency. Zero is treated as one.
    #[must_use]
    pub const fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = if max == 0 { 1 } else { max };
        self
    }
}
