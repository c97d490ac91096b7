//! In-memory cache implementation.

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use fiscal_core::{
    CacheStatus, FinancialRow, MetricsCache, Result, StatementKind, StatementMetrics, Symbol,
};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Cache entry with timestamp for TTL-based invalidation.
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    data: T,
    cached_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    fn age(&self) -> TimeDelta {
        Utc::now().signed_duration_since(self.cached_at)
    }

    fn is_stale(&self, ttl: Duration) -> bool {
        self.age() > TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX)
    }
}

/// Key for resolved statement entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct StatementKey {
    symbol: Symbol,
    year: i32,
    kind: StatementKind,
}

impl StatementKey {
    fn new(symbol: &Symbol, year: i32, kind: StatementKind) -> Self {
        Self {
            symbol: symbol.clone(),
            year,
            kind,
        }
    }
}

/// In-memory cache for fetched rows and resolved statements.
///
/// Data is stored in `RwLock`-protected `HashMap`s and is lost when the cache
/// is dropped. Values are cloned on get/put operations.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    rows: RwLock<HashMap<Symbol, CacheEntry<Vec<FinancialRow>>>>,
    statements: RwLock<HashMap<StatementKey, CacheEntry<Option<StatementMetrics>>>>,
}

impl InMemoryCache {
    /// Create a new empty in-memory cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MetricsCache for InMemoryCache {
    #[instrument(skip(self), fields(symbol = %symbol))]
    async fn get_rows(&self, symbol: &Symbol) -> Result<Option<Vec<FinancialRow>>> {
        let cache = self.rows.read().await;
        match cache.get(symbol) {
            Some(entry) => {
                debug!("Cache hit for rows");
                Ok(Some(entry.data.clone()))
            }
            None => {
                debug!("Cache miss for rows");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, rows), fields(symbol = %symbol, count = rows.len()))]
    async fn put_rows(&self, symbol: &Symbol, rows: &[FinancialRow]) -> Result<()> {
        let mut cache = self.rows.write().await;
        cache.insert(symbol.clone(), CacheEntry::new(rows.to_vec()));
        debug!("Cached {} rows", rows.len());
        Ok(())
    }

    #[instrument(skip(self), fields(symbol = %symbol))]
    async fn get_statement(
        &self,
        symbol: &Symbol,
        year: i32,
        kind: StatementKind,
    ) -> Result<Option<Option<StatementMetrics>>> {
        let key = StatementKey::new(symbol, year, kind);
        let cache = self.statements.read().await;
        match cache.get(&key) {
            Some(entry) => {
                debug!("Cache hit for statement");
                Ok(Some(entry.data.clone()))
            }
            None => {
                debug!("Cache miss for statement");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, metrics), fields(symbol = %symbol, resolved = metrics.is_some()))]
    async fn put_statement(
        &self,
        symbol: &Symbol,
        year: i32,
        kind: StatementKind,
        metrics: Option<&StatementMetrics>,
    ) -> Result<()> {
        let key = StatementKey::new(symbol, year, kind);
        let mut cache = self.statements.write().await;
        cache.insert(key, CacheEntry::new(metrics.cloned()));
        debug!("Cached statement");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn invalidate_stale(&self, ttl: Duration) -> Result<usize> {
        let mut total_removed = 0usize;

        {
            let mut cache = self.rows.write().await;
            let before = cache.len();
            cache.retain(|_, entry| !entry.is_stale(ttl));
            total_removed += before - cache.len();
        }

        {
            let mut cache = self.statements.write().await;
            let before = cache.len();
            cache.retain(|_, entry| !entry.is_stale(ttl));
            total_removed += before - cache.len();
        }

        if total_removed > 0 {
            debug!("Invalidated {} stale cache entries", total_removed);
        }

        Ok(total_removed)
    }

    async fn status(&self) -> Result<CacheStatus> {
        let rows = self.rows.read().await;
        let statements = self.statements.read().await;

        let oldest = rows
            .values()
            .map(CacheEntry::age)
            .chain(statements.values().map(CacheEntry::age))
            .max();

        Ok(CacheStatus {
            row_entries: rows.len(),
            statement_entries: statements.len(),
            oldest_entry_age: oldest.map(|age| age.to_std().unwrap_or(Duration::ZERO)),
        })
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<()> {
        self.rows.write().await.clear();
        self.statements.write().await.clear();
        debug!("Cleared all cache entries");
        Ok(())
    }
}
