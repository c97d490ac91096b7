//! Cache trait for fetched rows and resolved statements.
//!
//! Resolution is a pure function of the statement JSON, so resolved
//! statements can be memoized per ticker, fiscal year and statement kind.
//! Fetched rows are cached per ticker to spare the upstream API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{
    error::Result,
    metrics::StatementMetrics,
    statement::StatementKind,
    types::{FinancialRow, Symbol},
};

/// Trait for caching fetched rows and resolved statement metrics.
///
/// Implementations can store data in various backends (in-memory, no-op,
/// etc.) to avoid repeated fetches and repeated resolution.
#[async_trait]
pub trait MetricsCache: Send + Sync {
    /// Retrieves cached rows for a symbol.
    ///
    /// Returns `Ok(Some(rows))` if cached, `Ok(None)` if not cached.
    async fn get_rows(&self, symbol: &Symbol) -> Result<Option<Vec<FinancialRow>>>;

    /// Stores rows for a symbol.
    async fn put_rows(&self, symbol: &Symbol, rows: &[FinancialRow]) -> Result<()>;

    /// Retrieves cached resolved metrics for one statement of one year.
    ///
    /// `Ok(Some(None))` records that the statement had no report for the year.
    async fn get_statement(
        &self,
        symbol: &Symbol,
        year: i32,
        kind: StatementKind,
    ) -> Result<Option<Option<StatementMetrics>>>;

    /// Stores resolved metrics for one statement of one year.
    async fn put_statement(
        &self,
        symbol: &Symbol,
        year: i32,
        kind: StatementKind,
        metrics: Option<&StatementMetrics>,
    ) -> Result<()>;

    /// Removes cache entries older than the specified TTL.
    ///
    /// Returns the number of entries invalidated.
    async fn invalidate_stale(&self, ttl: Duration) -> Result<usize>;

    /// Reports the number of entries and the age of the oldest one.
    async fn status(&self) -> Result<CacheStatus>;

    /// Clears all cached data.
    async fn clear(&self) -> Result<()>;
}

/// Snapshot of cache occupancy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStatus {
    /// Number of cached row sets.
    pub row_entries: usize,
    /// Number of cached resolved statements.
    pub statement_entries: usize,
    /// Age of the oldest entry, if any.
    pub oldest_entry_age: Option<Duration>,
}

impl CacheStatus {
    /// Returns true if nothing is cached.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.row_entries == 0 && self.statement_entries == 0
    }

    /// Returns true if the oldest entry is older than `ttl`.
    #[must_use]
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.oldest_entry_age.is_some_and(|age| age > ttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_status_expiry() {
        let status = CacheStatus {
            row_entries: 1,
            statement_entries: 0,
            oldest_entry_age: Some(Duration::from_secs(120)),
        };
        assert!(!status.is_empty());
        assert!(status.is_expired(Duration::from_secs(60)));
        assert!(!status.is_expired(Duration::from_secs(300)));
        assert!(!CacheStatus::default().is_expired(Duration::ZERO));
    }
}
