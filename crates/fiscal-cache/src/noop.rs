//! No-op cache implementation.

use async_trait::async_trait;
use fiscal_core::{
    CacheStatus, FinancialRow, MetricsCache, Result, StatementKind, StatementMetrics, Symbol,
};
use std::time::Duration;
use tracing::trace;

/// A cache that never holds rows or statements.
///
/// Lookups always miss, so every request reaches a row source and every
/// statement is resolved again. Writes are accepted and dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl NoopCache {
    /// Create a new no-op cache.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MetricsCache for NoopCache {
    async fn get_rows(&self, _symbol: &Symbol) -> Result<Option<Vec<FinancialRow>>> {
        trace!("NoopCache: get_rows called, returning None");
        Ok(None)
    }

    async fn put_rows(&self, _symbol: &Symbol, _rows: &[FinancialRow]) -> Result<()> {
        trace!("NoopCache: put_rows called, doing nothing");
        Ok(())
    }

    async fn get_statement(
        &self,
        _symbol: &Symbol,
        _year: i32,
        _kind: StatementKind,
    ) -> Result<Option<Option<StatementMetrics>>> {
        trace!("NoopCache: get_statement called, returning None");
        Ok(None)
    }

    async fn put_statement(
        &self,
        _symbol: &Symbol,
        _year: i32,
        _kind: StatementKind,
        _metrics: Option<&StatementMetrics>,
    ) -> Result<()> {
        trace!("NoopCache: put_statement called, doing nothing");
        Ok(())
    }

    async fn invalidate_stale(&self, _ttl: Duration) -> Result<usize> {
        trace!("NoopCache: invalidate_stale called, returning 0");
        Ok(0)
    }

    async fn status(&self) -> Result<CacheStatus> {
        Ok(CacheStatus::default())
    }

    async fn clear(&self) -> Result<()> {
        trace!("NoopCache: clear called, doing nothing");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fiscal_core::CashFlowMetrics;

    #[tokio::test]
    async fn test_noop_cache_stores_nothing() {
        let cache = NoopCache::new();
        let symbol = Symbol::new("AAPL");
        let metrics = StatementMetrics::CashFlow(CashFlowMetrics::default());

        cache
            .put_rows(&symbol, &[FinancialRow::annual("AAPL", 2021)])
            .await
            .unwrap();
        cache
            .put_statement(&symbol, 2021, StatementKind::CashFlow, Some(&metrics))
            .await
            .unwrap();

        assert!(cache.get_rows(&symbol).await.unwrap().is_none());
        assert!(
            cache
                .get_statement(&symbol, 2021, StatementKind::CashFlow)
                .await
                .unwrap()
                .is_none()
        );
        assert!(cache.status().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_noop_cache_management() {
        let cache = NoopCache::new();

        let removed = cache
            .invalidate_stale(Duration::from_secs(3600))
            .await
            .unwrap();
        assert_eq!(removed, 0);
        assert!(cache.clear().await.is_ok());
    }
}
