//! Provider traits for fetching financial rows.
//!
//! This module defines the core provider traits:
//!
//! - [`DataProvider`] - Base trait for all row sources
//! - [`FinancialRowSource`] - Per-ticker and bulk financial rows

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::Result,
    types::{FinancialRow, Symbol},
};

/// Base trait for all data providers.
///
/// All sources must implement this trait to provide basic metadata about
/// themselves.
pub trait DataProvider: Send + Sync + Debug {
    /// Returns the name of this provider (e.g., "Financials API").
    fn name(&self) -> &str;

    /// Returns a description of this provider.
    fn description(&self) -> &str;
}

/// Source of [`FinancialRow`]s.
///
/// The rows carry the raw statement JSON; resolution happens downstream and
/// never inside a source.
#[async_trait]
pub trait FinancialRowSource: DataProvider {
    /// Fetches every row (all years and quarters) for one ticker.
    ///
    /// Returns `Ok(vec![])` when the source knows nothing about the ticker.
    async fn fetch_rows(&self, symbol: &Symbol) -> Result<Vec<FinancialRow>>;

    /// Fetches every row the source holds, across tickers.
    async fn fetch_all(&self) -> Result<Vec<FinancialRow>>;

    /// Fetches only the annual (quarter `0`) rows for one ticker.
    ///
    /// Default implementation filters [`fetch_rows`](Self::fetch_rows).
    async fn fetch_annual_rows(&self, symbol: &Symbol) -> Result<Vec<FinancialRow>> {
        let rows = self.fetch_rows(symbol).await?;
        Ok(rows.into_iter().filter(FinancialRow::is_annual).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct FixedSource(Vec<FinancialRow>);

    impl DataProvider for FixedSource {
        fn name(&self) -> &str {
            "fixed"
        }

        fn description(&self) -> &str {
            "fixed rows for tests"
        }
    }

    #[async_trait]
    impl FinancialRowSource for FixedSource {
        async fn fetch_rows(&self, symbol: &Symbol) -> Result<Vec<FinancialRow>> {
            Ok(self
                .0
                .iter()
                .filter(|r| &r.ticker == symbol)
                .cloned()
                .collect())
        }

        async fn fetch_all(&self) -> Result<Vec<FinancialRow>> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_fetch_annual_rows_filters_quarters() {
        let mut quarterly = FinancialRow::annual("AAPL", 2021);
        quarterly.quarter = 2;
        let source = FixedSource(vec![
            FinancialRow::annual("AAPL", 2021),
            quarterly,
            FinancialRow::annual("MSFT", 2021),
        ]);

        let rows = source.fetch_annual_rows(&Symbol::new("aapl")).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_annual());
        assert_eq!(source.fetch_all().await.unwrap().len(), 3);
    }
}
