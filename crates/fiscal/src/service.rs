//! Fundamentals service: fetch, resolve and memoize canonical metrics.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, instrument, warn};

use fiscal_core::{
    CacheStatus, CanonicalMetricSet, CompanyInfo, FinancialRow, FinancialRowSource,
    FinancialSnapshot, FiscalError, MetricSeries, MetricsCache, Result, StatementKind,
    StatementMetrics, Symbol,
};
use fiscal_resolve::{
    annual_row_for_year, assemble_snapshot, available_years, resolve_statement, series_from,
};

use crate::config::ServiceConfig;

/// Resolves canonical metrics for tickers, with source fallback and caching.
///
/// Sources are tried in registration order until one succeeds. When a cache
/// is configured, fetched rows are cached per ticker and every resolved
/// statement is memoized per ticker, fiscal year and statement kind.
///
/// # Example
///
/// ```rust,ignore
/// use fiscal::{ClientConfig, FundamentalsService, InMemoryCache, Symbol};
/// use std::sync::Arc;
///
/// let service = FundamentalsService::new()
///     .with_api(ClientConfig::new("http://localhost:8000"))?
///     .set_cache(Arc::new(InMemoryCache::new()));
///
/// let snapshot = service.snapshot(&Symbol::new("AAPL"), 2023).await?;
/// println!("{:?}", snapshot.ratios.net_profit_margin);
/// ```
#[derive(Default)]
pub struct FundamentalsService {
    sources: Vec<Arc<dyn FinancialRowSource>>,
    cache: Option<Arc<dyn MetricsCache>>,
    config: ServiceConfig,
}

impl std::fmt::Debug for FundamentalsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FundamentalsService")
            .field(
                "sources",
                &self.sources.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .field("cache", &self.cache.as_ref().map(|_| "configured"))
            .field("config", &self.config)
            .finish()
    }
}

impl FundamentalsService {
    /// Create a new service with no sources and no cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new service with a cache.
    #[must_use]
    pub fn with_cache(cache: Arc<dyn MetricsCache>) -> Self {
        Self {
            cache: Some(cache),
            ..Default::default()
        }
    }

    /// Set the cache for this service.
    #[must_use]
    pub fn set_cache(mut self, cache: Arc<dyn MetricsCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Set the service configuration.
    #[must_use]
    pub const fn with_config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the service configuration.
    #[must_use]
    pub const fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Register a row source. Sources are tried in registration order.
    pub fn register_source(&mut self, source: Arc<dyn FinancialRowSource>) {
        debug!(source = source.name(), "Registering row source");
        self.sources.push(source);
    }

    /// Add a row source.
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn FinancialRowSource>) -> Self {
        self.register_source(source);
        self
    }

    /// Add the financials API client as a source.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built from `config`.
    #[cfg(feature = "api")]
    pub fn with_api(self, config: fiscal_api::ClientConfig) -> Result<Self> {
        let client = fiscal_api::FinancialsClient::new(config)?;
        Ok(self.with_source(Arc::new(client)))
    }

    /// Fetches every row for a ticker, from the cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns [`FiscalError::ProviderNotConfigured`] without sources, or the
    /// last source error when every source fails.
    #[instrument(skip(self), fields(symbol = %symbol))]
    pub async fn rows(&self, symbol: &Symbol) -> Result<Vec<FinancialRow>> {
        if self.sources.is_empty() {
            return Err(FiscalError::ProviderNotConfigured(
                "No row sources registered".to_string(),
            ));
        }

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.invalidate_stale(self.config.cache_ttl).await {
                warn!(error = %e, "Failed to invalidate stale cache entries");
            }
            if let Ok(Some(cached)) = cache.get_rows(symbol).await {
                debug!(count = cached.len(), "Cache hit for rows");
                return Ok(cached);
            }
        }

        let mut last_error = None;
        for source in &self.sources {
            debug!(source = source.name(), "Fetching rows");

            match source.fetch_rows(symbol).await {
                Ok(rows) => {
                    if let Some(cache) = &self.cache
                        && let Err(e) = cache.put_rows(symbol, &rows).await
                    {
                        warn!(
                            source = source.name(),
                            error = %e,
                            "Failed to cache rows"
                        );
                    }
                    return Ok(rows);
                }
                Err(e) => {
                    warn!(
                        source = source.name(),
                        error = %e,
                        "Source failed, trying next"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| FiscalError::Other("All sources failed with no error".to_string())))
    }

    /// Resolves one statement of a row, memoized per ticker, year and kind.
    async fn statement(
        &self,
        row: &FinancialRow,
        kind: StatementKind,
        year: i32,
    ) -> Option<StatementMetrics> {
        if let Some(cache) = &self.cache {
            match cache.get_statement(&row.ticker, year, kind).await {
                Ok(Some(cached)) => return cached,
                Ok(None) => {}
                Err(e) => warn!(error = %e, "Failed to read statement cache"),
            }
        }

        let resolved = resolve_statement(row, kind, year);

        if let Some(cache) = &self.cache
            && let Err(e) = cache
                .put_statement(&row.ticker, year, kind, resolved.as_ref())
                .await
        {
            warn!(error = %e, "Failed to cache statement");
        }
        resolved
    }

    /// Resolves all three statements of a row for `year`.
    async fn resolve_row(&self, row: &FinancialRow, year: i32) -> CanonicalMetricSet {
        let mut statements = Vec::with_capacity(StatementKind::ALL.len());
        for kind in StatementKind::ALL {
            if let Some(metrics) = self.statement(row, kind, year).await {
                statements.push(metrics);
            }
        }
        CanonicalMetricSet::from_statements(&statements)
    }

    /// Canonical metrics for one ticker and fiscal year.
    ///
    /// # Errors
    ///
    /// Returns [`FiscalError::DataNotAvailable`] when the ticker has no annual
    /// row for `year`, or the fetch error.
    #[instrument(skip(self), fields(symbol = %symbol))]
    pub async fn metrics(&self, symbol: &Symbol, year: i32) -> Result<CanonicalMetricSet> {
        let rows = self.rows(symbol).await?;
        let row = annual_row_for_year(&rows, year).ok_or_else(|| not_available(symbol, year))?;
        Ok(self.resolve_row(row, year).await)
    }

    /// Canonical metrics and derived ratios for one ticker and fiscal year.
    ///
    /// # Errors
    ///
    /// Same as [`metrics`](Self::metrics).
    #[instrument(skip(self), fields(symbol = %symbol))]
    pub async fn snapshot(&self, symbol: &Symbol, year: i32) -> Result<FinancialSnapshot> {
        let rows = self.rows(symbol).await?;
        let row = annual_row_for_year(&rows, year).ok_or_else(|| not_available(symbol, year))?;
        let metrics = self.resolve_row(row, year).await;
        Ok(assemble_snapshot(row, year, metrics))
    }

    /// Snapshot of the most recent fiscal year with an annual row.
    ///
    /// # Errors
    ///
    /// Returns [`FiscalError::SymbolNotFound`] when the ticker has no annual
    /// rows, or the fetch error.
    pub async fn latest_snapshot(&self, symbol: &Symbol) -> Result<FinancialSnapshot> {
        let years = self.available_years(symbol).await?;
        let year = years
            .last()
            .copied()
            .ok_or_else(|| FiscalError::SymbolNotFound(symbol.to_string()))?;
        self.snapshot(symbol, year).await
    }

    /// Fiscal years with an annual row for a ticker, ascending.
    ///
    /// # Errors
    ///
    /// Returns the fetch error.
    pub async fn available_years(&self, symbol: &Symbol) -> Result<Vec<i32>> {
        let rows = self.rows(symbol).await?;
        Ok(available_years(&rows))
    }

    /// Company reference data from the ticker's first row.
    ///
    /// # Errors
    ///
    /// Returns [`FiscalError::SymbolNotFound`] when the ticker has no rows.
    pub async fn company_info(&self, symbol: &Symbol) -> Result<CompanyInfo> {
        let rows = self.rows(symbol).await?;
        rows.iter()
            .find(|row| row.is_annual())
            .or_else(|| rows.first())
            .map(FinancialRow::company_info)
            .ok_or_else(|| FiscalError::SymbolNotFound(symbol.to_string()))
    }

    /// Chart series across every fiscal year with an annual row.
    ///
    /// # Errors
    ///
    /// Returns the fetch error.
    #[instrument(skip(self), fields(symbol = %symbol))]
    pub async fn series(&self, symbol: &Symbol) -> Result<MetricSeries> {
        let rows = self.rows(symbol).await?;
        let mut years = Vec::new();
        for year in available_years(&rows) {
            if let Some(row) = annual_row_for_year(&rows, year) {
                years.push((year, self.resolve_row(row, year).await));
            }
        }
        Ok(series_from(symbol, years))
    }

    /// Snapshots for many tickers in one fiscal year.
    ///
    /// Tickers are processed concurrently, at most
    /// [`max_concurrency`](ServiceConfig::max_concurrency) at a time. Results
    /// come back in input order; one ticker failing does not affect the rest.
    pub async fn snapshots(
        &self,
        symbols: &[Symbol],
        year: i32,
    ) -> Vec<(Symbol, Result<FinancialSnapshot>)> {
        let mut results: Vec<(usize, Symbol, Result<FinancialSnapshot>)> =
            stream::iter(symbols.iter().enumerate())
                .map(|(index, symbol)| async move {
                    (index, symbol.clone(), self.snapshot(symbol, year).await)
                })
                .buffer_unordered(self.config.max_concurrency.max(1))
                .collect()
                .await;

        results.sort_by_key(|(index, _, _)| *index);
        results
            .into_iter()
            .map(|(_, symbol, result)| (symbol, result))
            .collect()
    }

    /// Occupancy of the configured cache. Empty without a cache.
    ///
    /// # Errors
    ///
    /// Returns the cache error.
    pub async fn cache_status(&self) -> Result<CacheStatus> {
        match &self.cache {
            Some(cache) => cache.status().await,
            None => Ok(CacheStatus::default()),
        }
    }

    /// Drops every cached row and statement.
    ///
    /// # Errors
    ///
    /// Returns the cache error.
    pub async fn clear_cache(&self) -> Result<()> {
        if let Some(cache) = &self.cache {
            cache.clear().await?;
        }
        Ok(())
    }
}

fn not_available(symbol: &Symbol, year: i32) -> FiscalError {
    FiscalError::DataNotAvailable {
        symbol: symbol.to_string(),
        year,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use fiscal_core::DataProvider;

    #[derive(Debug)]
    struct FailingSource;

    impl DataProvider for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        fn description(&self) -> &str {
            "always fails"
        }
    }

    #[async_trait]
    impl FinancialRowSource for FailingSource {
        async fn fetch_rows(&self, _symbol: &Symbol) -> Result<Vec<FinancialRow>> {
            Err(FiscalError::Network("connection refused".to_string()))
        }

        async fn fetch_all(&self) -> Result<Vec<FinancialRow>> {
            Err(FiscalError::Network("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_no_sources() {
        let service = FundamentalsService::new();
        let err = service.rows(&Symbol::new("AAPL")).await.unwrap_err();
        assert!(matches!(err, FiscalError::ProviderNotConfigured(_)));
    }

    #[tokio::test]
    async fn test_all_sources_fail() {
        let service = FundamentalsService::new().with_source(Arc::new(FailingSource));
        let err = service.rows(&Symbol::new("AAPL")).await.unwrap_err();
        assert!(matches!(err, FiscalError::Network(_)));
    }

    #[tokio::test]
    async fn test_empty_cache_status_without_cache() {
        let service = FundamentalsService::new();
        assert!(service.cache_status().await.unwrap().is_empty());
        service.clear_cache().await.unwrap();
    }

    #[test]
    fn test_debug_lists_sources() {
        let service = FundamentalsService::new().with_source(Arc::new(FailingSource));
        let debug = format!("{service:?}");
        assert!(debug.contains("failing"));
    }
}
