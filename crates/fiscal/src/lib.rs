#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fiscal/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Canonical financial metrics for a ticker and fiscal year.
//!
//! This crate re-exports the core types, the resolver and the cache
//! implementations, and provides a [`FundamentalsService`] that fetches rows,
//! resolves them once and serves snapshots and chart series.
//!
//! # Features
//!
//! - `api` - HTTP client for the financials API
//!
//! # Example
//!
//! ```rust,ignore
//! use fiscal::{ClientConfig, FundamentalsService, InMemoryCache, Symbol, frame};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> fiscal::Result<()> {
//!     let service = FundamentalsService::new()
//!         .with_api(ClientConfig::new("http://localhost:8000"))?
//!         .set_cache(Arc::new(InMemoryCache::new()));
//!
//!     let symbol = Symbol::new("AAPL");
//!     let snapshot = service.snapshot(&symbol, 2023).await?;
//!     println!("{:?}", snapshot.metrics);
//!
//!     let series = service.series(&symbol).await?;
//!     println!("{}", frame::revenue_income_frame(&series)?);
//!
//!     Ok(())
//! }
//! ```

// Core types and traits
pub use fiscal_core::*;

// Resolution
pub use fiscal_resolve::{
    BalanceIdentity, BalanceLine, Metric, MetricCandidates, ShareCountMatch, SharePattern,
    annual_row_for_year, annual_rows, assemble_snapshot, available_years, build_series,
    derive_balance_identity, derive_ratios, extract_shares_outstanding, parse_reports,
    resolve_balance, resolve_by_concept, resolve_by_exact_label, resolve_by_label_keyword,
    resolve_cash_flow, resolve_income, resolve_metric, resolve_operating_expense, resolve_report,
    resolve_statement, resolve_year, select_report, series_from, snapshot, try_parse_reports,
};

// Cache implementations
pub use fiscal_cache::{InMemoryCache, NoopCache};

// Sources
#[cfg(feature = "api")]
pub use fiscal_api::{ClientConfig, FinancialsClient, RemoteCacheState, RemoteCacheStatus};

/// Service configuration.
pub mod config;
/// Polars views of chart series.
pub mod frame;
mod service;

pub use config::ServiceConfig;
pub use service::FundamentalsService;
