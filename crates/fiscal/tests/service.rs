//! Service behavior over an in-memory row source.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use fiscal::{
    DataProvider, FinancialRow, FinancialRowSource, FiscalError, FundamentalsService,
    InMemoryCache, NoopCache, Result, ServiceConfig, StatementKind, Symbol, frame,
};
use serde_json::json;

#[derive(Debug, Default)]
struct CountingSource {
    rows: Vec<FinancialRow>,
    fetches: AtomicUsize,
}

impl CountingSource {
    fn new(rows: Vec<FinancialRow>) -> Self {
        Self {
            rows,
            fetches: AtomicUsize::new(0),
        }
    }

    fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl DataProvider for CountingSource {
    fn name(&self) -> &str {
        "counting"
    }

    fn description(&self) -> &str {
        "fixed rows that count fetches"
    }
}

#[async_trait]
impl FinancialRowSource for CountingSource {
    async fn fetch_rows(&self, symbol: &Symbol) -> Result<Vec<FinancialRow>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .rows
            .iter()
            .filter(|row| &row.ticker == symbol)
            .cloned()
            .collect())
    }

    async fn fetch_all(&self) -> Result<Vec<FinancialRow>> {
        Ok(self.rows.clone())
    }
}

#[derive(Debug)]
struct DownSource;

impl DataProvider for DownSource {
    fn name(&self) -> &str {
        "down"
    }

    fn description(&self) -> &str {
        "unreachable"
    }
}

#[async_trait]
impl FinancialRowSource for DownSource {
    async fn fetch_rows(&self, _symbol: &Symbol) -> Result<Vec<FinancialRow>> {
        Err(FiscalError::Network("timed out".to_string()))
    }

    async fn fetch_all(&self) -> Result<Vec<FinancialRow>> {
        Err(FiscalError::Network("timed out".to_string()))
    }
}

fn reports(date: &str, facts: serde_json::Value) -> serde_json::Value {
    json!(json!([{ "periodEndDate": date, "facts": facts }]).to_string())
}

fn acme_row(year: i32, revenue: f64, net_income: f64) -> FinancialRow {
    let date = format!("31-12-{year}");
    FinancialRow::annual("ACME", year)
        .with_company_name("Acme Corp")
        .with_statement(
            StatementKind::Income,
            reports(
                &date,
                json!({
                    "us-gaap_Revenues": {"label": "Total revenues", "value": revenue},
                    "us-gaap_NetIncomeLoss": {"label": "Net income", "value": net_income}
                }),
            ),
        )
        .with_statement(
            StatementKind::Balance,
            reports(
                &date,
                json!({
                    "us-gaap_Assets": {"label": "Total assets", "value": 1000},
                    "us-gaap_Liabilities": {"label": "Total liabilities", "value": 400}
                }),
            ),
        )
        .with_statement(
            StatementKind::CashFlow,
            reports(
                &date,
                json!({
                    "us-gaap_NetCashProvidedByUsedInOperatingActivities":
                        {"label": "Net cash provided by operating activities", "value": 300},
                    "us-gaap_PaymentsToAcquirePropertyPlantAndEquipment":
                        {"label": "Purchases of property and equipment", "value": -100},
                    "us-gaap_CashAndCashEquivalentsPeriodIncreaseDecrease":
                        {"label": "Net change in cash", "value": 25}
                }),
            ),
        )
}

fn rows() -> Vec<FinancialRow> {
    let mut quarterly = acme_row(2022, 1.0, 1.0);
    quarterly.quarter = 1;
    vec![
        acme_row(2022, 1200.0, 240.0),
        quarterly,
        acme_row(2021, 1000.0, 150.0),
        FinancialRow::annual("EMPTY", 2021),
    ]
}

#[tokio::test]
async fn test_snapshot() {
    let service = FundamentalsService::new().with_source(Arc::new(CountingSource::new(rows())));
    let snapshot = service.snapshot(&Symbol::new("acme"), 2021).await.unwrap();

    assert_eq!(snapshot.company_name.as_deref(), Some("Acme Corp"));
    assert_eq!(snapshot.metrics.revenue, Some(1000.0));
    assert_eq!(snapshot.metrics.total_equity, Some(600.0));
    assert_eq!(snapshot.metrics.capex, Some(-100.0));
    assert_eq!(snapshot.ratios.net_profit_margin, Some(15.0));
    assert_eq!(snapshot.ratios.free_cash_flow, Some(200.0));
}

#[tokio::test]
async fn test_missing_year_is_an_error() {
    let service = FundamentalsService::new().with_source(Arc::new(CountingSource::new(rows())));
    let err = service.snapshot(&Symbol::new("ACME"), 2019).await.unwrap_err();
    assert!(matches!(err, FiscalError::DataNotAvailable { year: 2019, .. }));
}

#[tokio::test]
async fn test_row_without_statements_resolves_to_nothing() {
    let service = FundamentalsService::new().with_source(Arc::new(CountingSource::new(rows())));
    let metrics = service.metrics(&Symbol::new("EMPTY"), 2021).await.unwrap();
    assert_eq!(metrics, fiscal::CanonicalMetricSet::default());
}

#[tokio::test]
async fn test_cache_spares_the_source() {
    let source = Arc::new(CountingSource::new(rows()));
    let cache = Arc::new(InMemoryCache::new());
    let service = FundamentalsService::with_cache(cache.clone()).with_source(source.clone());
    let symbol = Symbol::new("ACME");

    let first = service.snapshot(&symbol, 2021).await.unwrap();
    let second = service.snapshot(&symbol, 2021).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(source.fetches(), 1);

    let status = service.cache_status().await.unwrap();
    assert_eq!(status.row_entries, 1);
    assert_eq!(status.statement_entries, 3);

    service.clear_cache().await.unwrap();
    service.snapshot(&symbol, 2021).await.unwrap();
    assert_eq!(source.fetches(), 2);
}

#[tokio::test]
async fn test_zero_ttl_refetches() {
    let source = Arc::new(CountingSource::new(rows()));
    let service = FundamentalsService::with_cache(Arc::new(InMemoryCache::new()))
        .with_config(ServiceConfig::default().with_cache_ttl(Duration::ZERO))
        .with_source(source.clone());
    let symbol = Symbol::new("ACME");

    service.rows(&symbol).await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    service.rows(&symbol).await.unwrap();
    assert_eq!(source.fetches(), 2);
}

#[tokio::test]
async fn test_noop_cache_always_fetches() {
    let source = Arc::new(CountingSource::new(rows()));
    let service =
        FundamentalsService::with_cache(Arc::new(NoopCache::new())).with_source(source.clone());
    let symbol = Symbol::new("ACME");

    service.rows(&symbol).await.unwrap();
    service.rows(&symbol).await.unwrap();
    assert_eq!(source.fetches(), 2);
}

#[tokio::test]
async fn test_source_fallback() {
    let source = Arc::new(CountingSource::new(rows()));
    let service = FundamentalsService::new()
        .with_source(Arc::new(DownSource))
        .with_source(source.clone());

    let years = service.available_years(&Symbol::new("ACME")).await.unwrap();
    assert_eq!(years, vec![2021, 2022]);
    assert_eq!(source.fetches(), 1);
}

#[tokio::test]
async fn test_series_and_frames() {
    let service = FundamentalsService::new().with_source(Arc::new(CountingSource::new(rows())));
    let series = service.series(&Symbol::new("ACME")).await.unwrap();

    assert_eq!(series.len(), 2);
    assert_eq!(series.revenue_income[0].year, 2021);
    assert_eq!(series.revenue_income[1].revenue, Some(1200.0));
    assert_eq!(series.balance[0].equity, Some(600.0));
    assert_eq!(series.cash_change[1].net_change, Some(25.0));

    let df = frame::revenue_income_frame(&series).unwrap();
    assert_eq!(df.height(), 2);
    assert_eq!(df.column("revenue").unwrap().null_count(), 0);
}

#[tokio::test]
async fn test_company_info_and_latest() {
    let service = FundamentalsService::new().with_source(Arc::new(CountingSource::new(rows())));
    let symbol = Symbol::new("ACME");

    let info = service.company_info(&symbol).await.unwrap();
    assert_eq!(info.name, "Acme Corp");

    let latest = service.latest_snapshot(&symbol).await.unwrap();
    assert_eq!(latest.year, 2022);
    assert_eq!(latest.ratios.net_profit_margin, Some(20.0));

    let err = service.company_info(&Symbol::new("NONE")).await.unwrap_err();
    assert!(matches!(err, FiscalError::SymbolNotFound(_)));
}

#[tokio::test]
async fn test_snapshots_keep_input_order() {
    let service = FundamentalsService::new()
        .with_config(ServiceConfig::default().with_max_concurrency(2))
        .with_source(Arc::new(CountingSource::new(rows())));
    let symbols = [Symbol::new("EMPTY"), Symbol::new("ACME"), Symbol::new("NONE")];

    let results = service.snapshots(&symbols, 2021).await;
    let order: Vec<&str> = results.iter().map(|(s, _)| s.as_str()).collect();
    assert_eq!(order, vec!["EMPTY", "ACME", "NONE"]);
    assert!(results[0].1.is_ok());
    assert_eq!(
        results[1].1.as_ref().unwrap().metrics.net_income,
        Some(150.0)
    );
    assert!(matches!(
        results[2].1,
        Err(FiscalError::DataNotAvailable { .. })
    ));
}
